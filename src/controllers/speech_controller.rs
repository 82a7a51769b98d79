use axum::{
    extract::{Json, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{models::Sender, services::chat_service, AppState};

use super::DEFAULT_USER_ID;

// POST /api/voice-to-text (multipart, field "audio")
pub async fn post_voice_to_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut audio: Option<Vec<u8>> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("audio") {
            match field.bytes().await {
                Ok(bytes) => audio = Some(bytes.to_vec()),
                Err(e) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "error": format!("업로드 수신 실패: {e}") })),
                    )
                        .into_response();
                }
            }
        }
    }

    let Some(audio) = audio else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "음성 파일이 없습니다" })),
        )
            .into_response();
    };

    match state.speech.transcribe(audio).await {
        Ok(text) => {
            if let Err(e) =
                chat_service::append_chat_log(&state, DEFAULT_USER_ID, &text, Sender::User).await
            {
                tracing::warn!("chat log write failed: {e}");
            }
            (StatusCode::OK, Json(json!({ "success": true, "text": text }))).into_response()
        }
        Err(msg) => {
            tracing::warn!("transcription failed: {msg}");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": msg })),
            )
                .into_response()
        }
    }
}

#[derive(Deserialize)]
pub struct TtsForm {
    #[serde(default)]
    pub text: String,
}

// POST /api/text-to-speech
pub async fn post_text_to_speech(State(state): State<AppState>, Json(form): Json<TtsForm>) -> Response {
    let text = form.text.trim();
    if text.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "텍스트가 없습니다" })),
        )
            .into_response();
    }

    match state.speech.synthesize(text).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "audio/mp3")],
            bytes,
        )
            .into_response(),
        Err(msg) => {
            tracing::warn!("synthesis failed: {msg}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": msg })),
            )
                .into_response()
        }
    }
}
