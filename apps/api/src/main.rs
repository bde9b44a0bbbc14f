mod ai;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai::gate::AvailabilityGate;
use crate::ai::service::AiService;
use crate::config::Config;
use crate::llm_client::{GeminiClient, GeminiSettings};
use crate::models::resume::PgResumeStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize resume lookups (PostgreSQL)
    let resumes = PgResumeStore::connect(&config.database_url).await?;

    // Initialize completion service and decide AI availability once
    let gemini = GeminiClient::new(GeminiSettings {
        api_key: config.google_api_key.clone(),
        model: config.gemini_model.clone(),
        base_url: config.gemini_base_url.clone(),
        timeout: Duration::from_secs(config.ai_timeout_secs),
        max_retries: config.ai_max_retries,
    })?;
    info!("Completion client initialized (model: {})", gemini.model());

    let gate =
        AvailabilityGate::initialize(&config.google_api_key, &gemini, config.ai_startup_probe)
            .await;
    match gate.reason() {
        None => info!("AI features enabled"),
        Some(reason) => info!("AI features disabled: {reason:?}"),
    }

    let ai = AiService::new(Arc::new(gemini), gate)
        .with_schema_validation(config.ai_validate_schema);

    // Build app state
    let state = AppState {
        ai,
        resumes: Arc::new(resumes),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
