use std::net::SocketAddr;

use mongodb::Client;

use stocktalk::{config, routes, services, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    // Mongo connection
    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");
    let db = client.database(&settings.mongodb_db);

    if let Err(e) = services::db_init::ensure_indexes(&db).await {
        tracing::warn!("index bootstrap failed: {e}");
    }

    let kis = services::kis::KisClient::new(
        settings.kis_app_key.clone(),
        settings.kis_app_secret.clone(),
        settings.kis_account_no.clone(),
        settings.kis_real,
    );
    let speech = services::speech::SpeechClient::new(
        settings.clova_client_id.clone(),
        settings.clova_client_secret.clone(),
    );
    let classifier = services::classifier::GptClassifier::new(settings.openai_api_key.clone());

    tracing::info!(
        kis = kis.is_configured(),
        clova = speech.has_stt_keys(),
        llm = classifier.has_key(),
        "provider configuration"
    );

    let state = AppState {
        db,
        settings: settings.clone(),
        kis,
        speech,
        classifier,
        pending: services::pending::PendingStore::new(),
    };

    let app = routes::app(state);

    let addr = SocketAddr::from((
        settings.host.parse::<std::net::IpAddr>().unwrap(),
        settings.port,
    ));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
