//! Instrument directory: static name ↔ KRX code table with exact and
//! fuzzy resolution over free text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Instrument;

/// Display name → KRX code. Aliases share a code (NAVER/네이버,
/// 포스코/POSCO홀딩스). Declaration order is the tie-break when more
/// than one name appears in the text, so keep it stable.
const INSTRUMENTS: &[(&str, &str)] = &[
    ("삼성전자", "005930"),
    ("SK하이닉스", "000660"),
    ("네이버", "035420"),
    ("카카오", "035720"),
    ("현대자동차", "005380"),
    ("LG전자", "066570"),
    ("삼성바이오로직스", "207940"),
    ("POSCO홀딩스", "005490"),
    ("LG화학", "051910"),
    ("기아", "000270"),
    ("삼성SDI", "006400"),
    ("셀트리온", "068270"),
    ("SK이노베이션", "096770"),
    ("KB금융", "105560"),
    ("신한지주", "055550"),
    ("하나금융지주", "086790"),
    ("NAVER", "035420"),
    ("삼성물산", "028260"),
    ("LG생활건강", "051900"),
    ("삼성생명", "032830"),
    ("한국전력", "015760"),
    ("포스코", "005490"),
    ("현대모비스", "012330"),
    ("SK텔레콤", "017670"),
    ("KT", "030200"),
    ("LG유플러스", "032640"),
    ("엔씨소프트", "036570"),
    ("넷마블", "251270"),
    ("크래프톤", "259960"),
    ("카카오뱅크", "323410"),
    ("카카오페이", "377300"),
];

/// Minimum similarity for a fuzzy hit, matching the original 0.6 cutoff.
const FUZZY_CUTOFF: f64 = 0.6;

static RE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[가-힣A-Za-z0-9]+").unwrap());

fn instrument(name: &str, code: &str) -> Instrument {
    Instrument {
        name: name.to_string(),
        code: code.to_string(),
    }
}

/// First declared name that occurs verbatim in `text`.
pub fn resolve_exact(text: &str) -> Option<Instrument> {
    INSTRUMENTS
        .iter()
        .find(|(name, _)| text.contains(name))
        .map(|(name, code)| instrument(name, code))
}

/// Typo-tolerant lookup: tokenize `text` into alphanumeric/Hangul runs
/// and, token by token in scan order, accept the first token whose best
/// name similarity clears the cutoff. Deliberately not the globally
/// best match over the whole sentence.
pub fn resolve_fuzzy(text: &str) -> Option<Instrument> {
    for token in RE_TOKEN.find_iter(text) {
        let word = token.as_str();

        let mut best: Option<(&str, &str, f64)> = None;
        for (name, code) in INSTRUMENTS {
            let score = strsim::normalized_levenshtein(word, name);
            if best.map(|(_, _, s)| score > s).unwrap_or(true) {
                best = Some((name, code, score));
            }
        }

        if let Some((name, code, score)) = best {
            if score >= FUZZY_CUTOFF {
                return Some(instrument(name, code));
            }
        }
    }
    None
}

/// Exact match first; a fuzzy hit must never override an exact one.
pub fn resolve(text: &str) -> Option<Instrument> {
    resolve_exact(text).or_else(|| resolve_fuzzy(text))
}
