//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use apify_client::ApifyClient;
use gemini_client::GeminiClient;
use sitesignals::SignalProbe;

use crate::kernel::{
    ApifySearchProvider, GeminiTextGenerator, PgLeadStore, ProbeSignalCollector, ServerDeps,
};
use crate::server::routes::{
    draft_handler, enrich_handler, health_handler, scan_handler, update_contact_status_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub server_deps: Arc<ServerDeps>,
}

/// Build the Axum application router with production dependencies wired in.
///
/// The Google API key serves both Gemini and the PageSpeed API.
pub fn build_app(pool: PgPool, apify_api_token: String, google_api_key: String) -> Router {
    let search = Arc::new(ApifySearchProvider::new(
        Arc::new(ApifyClient::new(apify_api_token)),
        "en".to_string(),
    ));
    let ai = Arc::new(GeminiTextGenerator::new(GeminiClient::new(
        google_api_key.clone(),
    )));
    let signals = Arc::new(ProbeSignalCollector::new(SignalProbe::new(Some(
        google_api_key,
    ))));
    let store = Arc::new(PgLeadStore::new(pool.clone()));

    let server_deps = ServerDeps::new(pool.clone(), search, ai, signals, store);

    let app_state = AppState {
        db_pool: pool,
        server_deps: Arc::new(server_deps),
    };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/scan", post(scan_handler))
        .route("/enrich", post(enrich_handler))
        .route("/draft", post(draft_handler))
        .route("/contacts/update-status", post(update_contact_status_handler))
        .route("/health", get(health_handler))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
