use axum::{routing::get, Router};

use crate::{controllers::history_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/history", get(history_controller::get_history))
        .route("/api/orders", get(history_controller::get_orders))
}
