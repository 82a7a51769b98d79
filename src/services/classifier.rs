//! LLM-assisted command classifier. The model is asked for exactly
//! three labeled lines (행동/종목/수량); the reply is parsed by line
//! prefix. Any failure — missing key, network, timeout, malformed or
//! unrecognized reply — falls back to the rule-based parser, so
//! classification as a whole is total.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::models::{Intent, QueryKind, TradeAction};
use crate::{directory, parser};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const CLASSIFIER_MODEL: &str = "gpt-3.5-turbo";
const CLASSIFIER_TIMEOUT: Duration = Duration::from_secs(8);

const SYSTEM_PROMPT: &str = "\
당신은 주식 거래 명령어를 분석하는 AI입니다.
사용자의 자연어 명령을 분석해서 다음 정보를 추출하세요:
- 행동: 매수, 매도, 현재가조회, 잔고조회, 보유종목조회
- 종목명: 삼성전자, SK하이닉스, 네이버, 카카오 등 (정확한 이름으로 변환)
- 수량: 숫자 (없으면 0)

응답 형식:
행동: [매수/매도/현재가/잔고/보유종목]
종목: [종목명]
수량: [숫자]";

#[derive(Serialize)]
struct ChatRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct GptClassifier {
    http: Client,
    api_key: String,
}

impl GptClassifier {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
        }
    }

    pub fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn complete(&self, text: &str) -> Result<String, String> {
        let body = ChatRequest {
            model: CLASSIFIER_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: text.to_string(),
                },
            ],
            temperature: 0.3,
            max_tokens: 100,
        };

        let res = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .timeout(CLASSIFIER_TIMEOUT)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !res.status().is_success() {
            return Err(format!("completion failed: HTTP {}", res.status()));
        }

        let parsed = res.json::<ChatResponse>().await.map_err(|e| e.to_string())?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| "empty completion".to_string())
    }

    pub async fn classify(&self, text: &str) -> Result<Intent, String> {
        if !self.has_key() {
            return Err("no API key configured".to_string());
        }
        let reply = self.complete(text).await?;
        intent_from_reply(&reply, text)
    }
}

/// Map the model's labeled reply onto an `Intent`. Unknown action
/// labels are an error so the caller falls back rather than guessing.
pub fn intent_from_reply(reply: &str, raw_text: &str) -> Result<Intent, String> {
    let mut action_label = String::new();
    let mut stock_label = String::new();
    let mut qty_label = String::new();

    for line in reply.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("행동:") {
            action_label = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("종목:") {
            stock_label = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("수량:") {
            qty_label = rest.trim().to_string();
        }
    }

    if action_label.is_empty() {
        return Err("reply missing action line".to_string());
    }

    let raw = raw_text.trim().to_string();
    let instrument = directory::resolve(&stock_label).or_else(|| directory::resolve(&raw));

    if action_label.contains("현재가") {
        return Ok(Intent::Query {
            kind: QueryKind::Price,
            instrument,
            raw,
        });
    }
    if action_label.contains("잔고") {
        return Ok(Intent::Query {
            kind: QueryKind::Balance,
            instrument: None,
            raw,
        });
    }
    if action_label.contains("보유") {
        return Ok(Intent::Query {
            kind: QueryKind::Holdings,
            instrument: None,
            raw,
        });
    }

    let action = if action_label.contains("매수") {
        TradeAction::Buy
    } else if action_label.contains("매도") {
        TradeAction::Sell
    } else {
        return Err(format!("unrecognized action label: {action_label}"));
    };

    // The template does not carry quantities like "전부" or the order
    // style, so those still come from the deterministic extractors.
    let quantity = qty_label
        .parse::<i64>()
        .ok()
        .filter(|q| *q > 0)
        .or_else(|| parser::extract_quantity(&raw));
    let (style, limit_price) = parser::extract_order_style(&raw);

    Ok(Intent::Trade {
        action,
        instrument,
        quantity,
        style,
        limit_price,
        raw,
    })
}

/// Two-stage strategy: try the LLM classifier, fall through to the
/// rule-based parser on any failure. Every input yields an `Intent`.
pub async fn classify_command(classifier: &GptClassifier, text: &str) -> Intent {
    match classifier.classify(text).await {
        Ok(intent) => intent,
        Err(e) => {
            if classifier.has_key() {
                tracing::warn!("LLM classifier unavailable, using rule-based parser: {e}");
            }
            parser::parse(text)
        }
    }
}
