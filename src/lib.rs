//! Library entrypoint for stocktalk.
//!
//! This file exists mainly to make controller tests easy (integration
//! tests under `tests/` can import the app state, routers, parser,
//! services).

pub mod config;
pub mod models;

pub mod directory;
pub mod parser;

pub mod services;

#[path = "views/format.rs"]
pub mod format;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub db: mongodb::Database,
    pub settings: config::Settings,
    pub kis: services::kis::KisClient,
    pub speech: services::speech::SpeechClient,
    pub classifier: services::classifier::GptClassifier,
    pub pending: services::pending::PendingStore,
}
