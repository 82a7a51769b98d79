use axum::{routing::post, Router};

use crate::{controllers::speech_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/voice-to-text", post(speech_controller::post_voice_to_text))
        .route("/api/text-to-speech", post(speech_controller::post_text_to_speech))
}
