use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One line of the append-only conversation audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatLogEntry {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: i64,
    pub message: String,
    pub sender: Sender,
    pub created_at: i64,
}
