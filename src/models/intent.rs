use serde::{Deserialize, Serialize};

use super::Instrument;

/// Quantity sentinel meaning "the entire held position". Resolved to a
/// concrete share count against the holdings snapshot at execute time.
pub const QTY_ALL: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    pub fn korean(self) -> &'static str {
        match self {
            TradeAction::Buy => "매수",
            TradeAction::Sell => "매도",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Price,
    Balance,
    Holdings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStyle {
    Market,
    Limit,
}

/// Structured outcome of parsing one user utterance. Every variant
/// keeps the trimmed raw input for the chat log.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Query {
        kind: QueryKind,
        /// Only resolved (and only required) for price queries.
        instrument: Option<Instrument>,
        raw: String,
    },
    Trade {
        action: TradeAction,
        instrument: Option<Instrument>,
        /// `Some(QTY_ALL)` means the entire position; positive otherwise.
        quantity: Option<i64>,
        style: OrderStyle,
        /// 0 for market orders.
        limit_price: i64,
        raw: String,
    },
    Unknown {
        raw: String,
    },
}

impl Intent {
    pub fn raw(&self) -> &str {
        match self {
            Intent::Query { raw, .. } => raw,
            Intent::Trade { raw, .. } => raw,
            Intent::Unknown { raw } => raw,
        }
    }
}
