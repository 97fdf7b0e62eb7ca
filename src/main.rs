use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use flightbot::config::AppConfig;
use flightbot::db;
use flightbot::dialogs::Capabilities;
use flightbot::handlers;
use flightbot::services::messaging::webhook::WebhookMessenger;
use flightbot::services::messaging::{LogMessenger, MessagingProvider};
use flightbot::services::nlu::luis::LuisRecognizer;
use flightbot::services::nlu::Recognizer;
use flightbot::services::report::http::HttpReportFetcher;
use flightbot::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let recognizer: Option<Box<dyn Recognizer>> = if config.luis_is_configured() {
        tracing::info!("using LUIS recognizer (host: {})", config.luis_api_host_name);
        Some(Box::new(LuisRecognizer::new(
            config.luis_app_id.clone(),
            config.luis_api_key.clone(),
            config.luis_api_host_name.clone(),
        )))
    } else {
        tracing::warn!("LUIS is not configured, booking details will be collected step by step");
        None
    };

    let reports = HttpReportFetcher::new(
        config.distance_api_url.clone(),
        config.emissions_api_url.clone(),
        config.equivalents_url.clone(),
    );

    let messaging: Box<dyn MessagingProvider> = if config.callback_url.is_empty() {
        tracing::warn!("CALLBACK_URL not set, webhook replies will only be logged");
        Box::new(LogMessenger)
    } else {
        tracing::info!("delivering webhook replies to {}", config.callback_url);
        Box::new(WebhookMessenger::new(config.callback_url.clone()))
    };

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        capabilities: Capabilities {
            recognizer,
            reports: Box::new(reports),
        },
        messaging,
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/messages", post(handlers::messages::send_message))
        .route("/webhook/message", post(handlers::webhook::message_webhook))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
