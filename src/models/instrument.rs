use serde::{Deserialize, Serialize};

/// A tradable security: human-readable Korean name plus the KRX code
/// the brokerage API expects. Several names may share one code
/// (e.g. 네이버 and NAVER).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub name: String,
    pub code: String,
}
