use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::{services::chat_service, AppState};

use super::DEFAULT_USER_ID;

const HISTORY_LIMIT: i64 = 50;
const ORDERS_LIMIT: i64 = 10;

// GET /api/history
pub async fn get_history(State(state): State<AppState>) -> Response {
    match chat_service::recent_chat_history(&state, DEFAULT_USER_ID, HISTORY_LIMIT).await {
        Ok(entries) => {
            let items: Vec<_> = entries
                .iter()
                .map(|e| {
                    json!({
                        "message": e.message,
                        "sender": e.sender,
                        "created_at": e.created_at,
                    })
                })
                .collect();
            (StatusCode::OK, Json(json!({ "history": items }))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("db error: {e}") })),
        )
            .into_response(),
    }
}

// GET /api/orders
pub async fn get_orders(State(state): State<AppState>) -> Response {
    match chat_service::recent_orders(&state, DEFAULT_USER_ID, ORDERS_LIMIT).await {
        Ok(orders) => {
            let items: Vec<_> = orders
                .iter()
                .map(|o| {
                    json!({
                        "code": o.code,
                        "name": o.name,
                        "action": o.action,
                        "quantity": o.quantity,
                        "style": o.style,
                        "limit_price": o.limit_price,
                        "status": o.status,
                        "order_no": o.order_no,
                        "created_at": o.created_at,
                        "filled_price": o.filled_price,
                        "filled_at": o.filled_at,
                    })
                })
                .collect();
            (StatusCode::OK, Json(json!({ "orders": items }))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("db error: {e}") })),
        )
            .into_response(),
    }
}
