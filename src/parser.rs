//! Rule-based command parser: keyword detection, Korean spoken-number
//! conversion, quantity and order-style extraction, and the top-level
//! `parse` that always yields an `Intent`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::directory;
use crate::models::{Intent, OrderStyle, QueryKind, TradeAction, QTY_ALL};

// Keyword tables are scanned with plain substring containment, not
// tokenized word matching. That keeps recognition robust against
// voice-transcription spacing but risks false positives on keyword
// collisions (known limitation carried over from the original tables).
const BUY_KEYWORDS: &[&str] = &[
    "사", "사줘", "사주세요", "매수", "매수해", "매수해줘",
    "매수해주세요", "구매", "구매해", "구매해줘", "살게", "사자",
    "매입", "매입해", "매입해줘",
];

const SELL_KEYWORDS: &[&str] = &[
    "팔", "팔아", "팔아줘", "팔아주세요", "매도", "매도해",
    "매도해줘", "매도해주세요", "판매", "판매해", "판매해줘",
    "팔게", "팔자", "처분", "처분해",
];

const PRICE_KEYWORDS: &[&str] = &[
    "현재가", "가격", "시세", "얼마", "호가", "가격표",
    "지금", "현재", "값", "시가",
];

const BALANCE_KEYWORDS: &[&str] = &[
    "잔고", "얼마남았", "돈", "예수금", "내돈", "잔액",
    "남은돈", "내계좌", "계좌", "돈얼마",
];

const HOLDINGS_KEYWORDS: &[&str] = &[
    "보유", "가진", "내주식", "내꺼", "포트폴리오", "보유종목",
    "내가가진", "내것", "보유주식", "내종목",
];

const ENTIRETY_KEYWORDS: &[&str] = &["전부", "전량", "모두", "다", "올인"];

static RE_QTY_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*주").unwrap());
static RE_QTY_SPOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([영공일이삼사오육륙칠팔구십백천만]+)\s*주").unwrap());
static RE_LIMIT_PRICE: Lazy<Regex> = Lazy::new(|| Regex::new(r"지정가\s*(\d+)").unwrap());
static RE_BARE_WON: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4,})\s*원").unwrap());

fn numeral_value(c: char) -> Option<i64> {
    Some(match c {
        '영' | '공' => 0,
        '일' => 1,
        '이' => 2,
        '삼' => 3,
        '사' => 4,
        '오' => 5,
        '육' | '륙' => 6,
        '칠' => 7,
        '팔' => 8,
        '구' => 9,
        '십' => 10,
        '백' => 100,
        '천' => 1000,
        '만' => 10000,
        _ => return None,
    })
}

/// Convert a Korean positional numeral ("육십오", "이천삼백십이") to an
/// integer. Digit words accumulate into a running value; a unit word
/// multiplies the accumulator (defaulting to 1, so bare "십" is 10) and
/// folds it into the total. ASCII digit strings pass through as-is.
pub fn parse_spoken_number(text: &str) -> i64 {
    let text = text.trim();

    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        return text.parse().unwrap_or(0);
    }

    let mut total = 0i64;
    let mut current = 0i64;

    for c in text.chars() {
        let Some(value) = numeral_value(c) else {
            continue;
        };
        if value >= 10 {
            if current == 0 {
                current = 1;
            }
            current *= value;
            total += current;
            current = 0;
        } else {
            current += value;
        }
    }

    total + current
}

/// Buy keywords are checked before sell keywords; the first hit wins.
pub fn detect_trade_action(text: &str) -> Option<TradeAction> {
    let text = text.to_lowercase();

    if BUY_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        return Some(TradeAction::Buy);
    }
    if SELL_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        return Some(TradeAction::Sell);
    }
    None
}

/// Price before balance before holdings; first hit wins, so a sentence
/// carrying both a price word and a balance word reads as a price query.
pub fn detect_query_kind(text: &str) -> Option<QueryKind> {
    let text = text.to_lowercase();

    if PRICE_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        return Some(QueryKind::Price);
    }
    if BALANCE_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        return Some(QueryKind::Balance);
    }
    if HOLDINGS_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        return Some(QueryKind::Holdings);
    }
    None
}

/// Share-count extraction, strictly in precedence order:
/// digits + 주, then spoken numerals + 주, then an entirety keyword
/// (yields `QTY_ALL`). A text with both "10주" and "전부" is 10.
/// A zero share count is never a quantity; "0주" falls through to the
/// later rules or to the clarification turn.
pub fn extract_quantity(text: &str) -> Option<i64> {
    if let Some(caps) = RE_QTY_DIGITS.captures(text) {
        if let Ok(n) = caps[1].parse::<i64>() {
            if n > 0 {
                return Some(n);
            }
        }
    }

    if let Some(caps) = RE_QTY_SPOKEN.captures(text) {
        let n = parse_spoken_number(&caps[1]);
        if n > 0 {
            return Some(n);
        }
    }

    if ENTIRETY_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        return Some(QTY_ALL);
    }

    None
}

/// Market/limit detection: explicit 시장가 wins, then 지정가 with a
/// price, then a bare 4-or-more-digit amount followed by 원. Market at
/// price 0 is the default.
pub fn extract_order_style(text: &str) -> (OrderStyle, i64) {
    if text.contains("시장가") {
        return (OrderStyle::Market, 0);
    }

    if let Some(caps) = RE_LIMIT_PRICE.captures(text) {
        if let Ok(price) = caps[1].parse::<i64>() {
            return (OrderStyle::Limit, price);
        }
    }

    if let Some(caps) = RE_BARE_WON.captures(text) {
        if let Ok(price) = caps[1].parse::<i64>() {
            return (OrderStyle::Limit, price);
        }
    }

    (OrderStyle::Market, 0)
}

/// Total parse: query detection strictly precedes trade detection, and
/// anything else is `Unknown`. Never fails.
pub fn parse(text: &str) -> Intent {
    let raw = text.trim().to_string();

    if let Some(kind) = detect_query_kind(&raw) {
        let instrument = if kind == QueryKind::Price {
            directory::resolve(&raw)
        } else {
            None
        };
        return Intent::Query { kind, instrument, raw };
    }

    if let Some(action) = detect_trade_action(&raw) {
        let instrument = directory::resolve(&raw);
        let quantity = extract_quantity(&raw);
        let (style, limit_price) = extract_order_style(&raw);
        return Intent::Trade {
            action,
            instrument,
            quantity,
            style,
            limit_price,
            raw,
        };
    }

    Intent::Unknown { raw }
}
