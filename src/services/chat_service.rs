//! MongoDB persistence for the chat audit trail and placed orders.
//! Callers on the user-facing path treat every write as best-effort.

use futures_util::StreamExt;

use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::FindOptions;

use crate::models::{ChatLogEntry, Order, OrderStatus, PendingConfirmation, Sender};
use crate::AppState;

pub async fn append_chat_log(
    state: &AppState,
    user_id: i64,
    message: &str,
    sender: Sender,
) -> Result<ObjectId, String> {
    let logs = state.db.collection::<ChatLogEntry>("chat_logs");
    let entry = ChatLogEntry {
        id: ObjectId::new(),
        user_id,
        message: message.to_string(),
        sender,
        created_at: Utc::now().timestamp(),
    };
    logs.insert_one(&entry, None)
        .await
        .map_err(|e| e.to_string())?;
    Ok(entry.id)
}

/// Most recent entries, returned oldest-first for display.
pub async fn recent_chat_history(
    state: &AppState,
    user_id: i64,
    limit: i64,
) -> Result<Vec<ChatLogEntry>, String> {
    let logs = state.db.collection::<ChatLogEntry>("chat_logs");
    let opts = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .limit(limit)
        .build();

    let mut cursor = logs
        .find(doc! { "user_id": user_id }, opts)
        .await
        .map_err(|e| e.to_string())?;

    let mut out: Vec<ChatLogEntry> = vec![];
    while let Some(res) = cursor.next().await {
        out.push(res.map_err(|e| e.to_string())?);
    }
    out.reverse();
    Ok(out)
}

pub async fn save_order(
    state: &AppState,
    user_id: i64,
    confirmation: &PendingConfirmation,
    quantity: i64,
    order_no: &str,
) -> Result<ObjectId, String> {
    let orders = state.db.collection::<Order>("orders");
    let order = Order {
        id: ObjectId::new(),
        user_id,
        code: confirmation.code.clone(),
        name: confirmation.name.clone(),
        action: confirmation.action,
        quantity,
        style: confirmation.style,
        limit_price: confirmation.limit_price,
        status: OrderStatus::Pending,
        order_no: order_no.to_string(),
        created_at: Utc::now().timestamp(),
        filled_price: None,
        filled_at: None,
    };
    orders
        .insert_one(&order, None)
        .await
        .map_err(|e| e.to_string())?;
    Ok(order.id)
}

/// Status reconciliation hook; the broker fills asynchronously, so
/// this is driven from outside the command flow.
pub async fn update_order_status(
    state: &AppState,
    order_id: ObjectId,
    status: OrderStatus,
    filled_price: Option<i64>,
) -> Result<bool, String> {
    let orders = state.db.collection::<Order>("orders");

    let update = match filled_price {
        Some(price) => doc! {
            "$set": {
                "status": mongodb::bson::to_bson(&status).map_err(|e| e.to_string())?,
                "filled_price": price,
                "filled_at": Utc::now().timestamp(),
            }
        },
        None => doc! {
            "$set": {
                "status": mongodb::bson::to_bson(&status).map_err(|e| e.to_string())?,
            }
        },
    };

    let res = orders
        .update_one(doc! { "_id": order_id }, update, None)
        .await
        .map_err(|e| e.to_string())?;
    Ok(res.modified_count > 0)
}

pub async fn recent_orders(state: &AppState, user_id: i64, limit: i64) -> Result<Vec<Order>, String> {
    let orders = state.db.collection::<Order>("orders");
    let opts = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .limit(limit)
        .build();

    let mut cursor = orders
        .find(doc! { "user_id": user_id }, opts)
        .await
        .map_err(|e| e.to_string())?;

    let mut out: Vec<Order> = vec![];
    while let Some(res) = cursor.next().await {
        out.push(res.map_err(|e| e.to_string())?);
    }
    Ok(out)
}
