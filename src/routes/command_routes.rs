use axum::{routing::post, Router};

use crate::{controllers::command_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/process-command", post(command_controller::post_process_command))
        .route("/api/execute-order", post(command_controller::post_execute_order))
}
