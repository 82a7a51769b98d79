use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::intent::{OrderStyle, TradeAction};

/// A fully-specified trade waiting for an explicit user confirmation.
/// Held server-side in the pending store under a single-use token and
/// echoed to the client for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingConfirmation {
    pub name: String,
    pub code: String,
    pub action: TradeAction,
    pub quantity: i64,
    pub style: OrderStyle,
    pub limit_price: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Filled,
    Canceled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: i64,
    pub code: String,
    pub name: String,
    pub action: TradeAction,
    pub quantity: i64,
    pub style: OrderStyle,
    pub limit_price: i64,
    pub status: OrderStatus,
    /// Broker-assigned order number.
    pub order_no: String,
    pub created_at: i64,
    #[serde(default)]
    pub filled_price: Option<i64>,
    #[serde(default)]
    pub filled_at: Option<i64>,
}
