use axum::{
    http::{header, Request, StatusCode},
    routing::post,
    Router,
};
use http_body_util::BodyExt;
use mongodb::Client;
use stocktalk::{config, controllers::command_controller, services, AppState};
use tower::ServiceExt;

async fn test_state() -> AppState {
    let mut settings = config::load();
    settings.mongodb_uri = "mongodb://localhost:27017/?serverSelectionTimeoutMS=1000".to_string();
    settings.mongodb_db = "stocktalk_test".to_string();

    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("mongodb client");
    let db = client.database(&settings.mongodb_db);

    AppState {
        db,
        settings,
        kis: services::kis::KisClient::new(String::new(), String::new(), String::new(), false),
        speech: services::speech::SpeechClient::new(String::new(), String::new()),
        classifier: services::classifier::GptClassifier::new(String::new()),
        pending: services::pending::PendingStore::new(),
    }
}

async fn response_body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

#[tokio::test]
async fn process_command_rejects_empty_text() {
    let state = test_state().await;
    let app = Router::new()
        .route(
            "/api/process-command",
            post(command_controller::post_process_command),
        )
        .with_state(state);

    let req = Request::builder()
        .method("POST")
        .uri("/api/process-command")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(r#"{"text":"   "}"#))
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("텍스트가 없습니다"));
}

#[tokio::test]
async fn execute_order_rejects_missing_token() {
    let state = test_state().await;
    let app = Router::new()
        .route(
            "/api/execute-order",
            post(command_controller::post_execute_order),
        )
        .with_state(state);

    let req = Request::builder()
        .method("POST")
        .uri("/api/execute-order")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(r#"{"confirm_token":""}"#))
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("\"success\":false"));
    assert!(body.contains("확인 토큰이 없습니다"));
}
