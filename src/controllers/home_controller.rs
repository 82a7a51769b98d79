use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use mongodb::bson::doc;
use serde_json::json;

use crate::AppState;

// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "running",
            "kis_api": state.kis.is_configured(),
            "clova_stt": state.speech.has_stt_keys(),
            "llm": state.classifier.has_key(),
        })),
    )
}

// GET /health/db
pub async fn health_db(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.run_command(doc! { "ping": 1 }, None).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "mongo": "ok" }))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "mongo": format!("error: {e}") })),
        )
            .into_response(),
    }
}
