use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub host: String,
    pub port: u16,

    pub kis_app_key: String,
    pub kis_app_secret: String,
    pub kis_account_no: String,
    /// false = paper-trading endpoint, true = live.
    pub kis_real: bool,

    pub clova_client_id: String,
    pub clova_client_secret: String,

    pub openai_api_key: String,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let mongodb_uri = env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let mongodb_db = env::var("MONGODB_DB")
        .unwrap_or_else(|_| "stocktalk".to_string());

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let kis_app_key = env::var("KIS_APP_KEY").unwrap_or_default();
    let kis_app_secret = env::var("KIS_APP_SECRET").unwrap_or_default();
    let kis_account_no = env::var("KIS_ACCOUNT_NO").unwrap_or_default();
    let kis_real = env::var("KIS_REAL")
        .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let clova_client_id = env::var("CLOVA_CLIENT_ID").unwrap_or_default();
    let clova_client_secret = env::var("CLOVA_CLIENT_SECRET").unwrap_or_default();

    let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();

    Settings {
        mongodb_uri,
        mongodb_db,
        host,
        port,
        kis_app_key,
        kis_app_secret,
        kis_account_no,
        kis_real,
        clova_client_id,
        clova_client_secret,
        openai_api_key,
    }
}
