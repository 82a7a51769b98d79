use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::Sender,
    services::{chat_service, classifier, command_service},
    AppState,
};

use super::DEFAULT_USER_ID;

#[derive(Deserialize)]
pub struct ProcessForm {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub input_type: Option<String>,
}

#[derive(Deserialize)]
pub struct ExecuteForm {
    #[serde(default)]
    pub confirm_token: String,
}

// POST /api/process-command
pub async fn post_process_command(
    State(state): State<AppState>,
    Json(form): Json<ProcessForm>,
) -> Response {
    let text = form.text.trim().to_string();
    if text.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "텍스트가 없습니다" })),
        )
            .into_response();
    }

    // Voice input was already logged by the transcription endpoint.
    if form.input_type.as_deref() == Some("keyboard") {
        if let Err(e) =
            chat_service::append_chat_log(&state, DEFAULT_USER_ID, &text, Sender::User).await
        {
            tracing::warn!("chat log write failed: {e}");
        }
    }

    let intent = classifier::classify_command(&state.classifier, &text).await;
    tracing::debug!(raw = intent.raw(), "classified command");

    let outcome = command_service::handle(&state, &intent).await;

    if let Err(e) =
        chat_service::append_chat_log(&state, DEFAULT_USER_ID, &outcome.reply.message, Sender::Bot)
            .await
    {
        tracing::warn!("chat log write failed: {e}");
    }

    let body = match outcome.confirmation {
        Some((token, confirmation)) => json!({
            "message": outcome.reply.message,
            "speak": outcome.reply.speak,
            "type": "confirm",
            "confirm_token": token,
            "confirm_data": confirmation,
        }),
        None => json!({
            "message": outcome.reply.message,
            "speak": outcome.reply.speak,
        }),
    };

    (StatusCode::OK, Json(body)).into_response()
}

// POST /api/execute-order
pub async fn post_execute_order(
    State(state): State<AppState>,
    Json(form): Json<ExecuteForm>,
) -> Response {
    let token = form.confirm_token.trim();
    if token.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "확인 토큰이 없습니다" })),
        )
            .into_response();
    }

    let outcome = command_service::execute(&state, DEFAULT_USER_ID, token).await;

    if let Err(e) =
        chat_service::append_chat_log(&state, DEFAULT_USER_ID, &outcome.reply.message, Sender::Bot)
            .await
    {
        tracing::warn!("chat log write failed: {e}");
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": outcome.success,
            "message": outcome.reply.message,
            "speak": outcome.reply.speak,
        })),
    )
        .into_response()
}
