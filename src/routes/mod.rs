use axum::Router;
use tower_http::cors::CorsLayer;

use crate::AppState;

pub mod command_routes;
pub mod history_routes;
pub mod home_routes;
pub mod speech_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = command_routes::add_routes(router);
    let router = speech_routes::add_routes(router);
    let router = history_routes::add_routes(router);

    router
        // browser clients (the original front end) call from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
