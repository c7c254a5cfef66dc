mod agents;
mod config;
mod db;
mod errors;
mod extract;
mod interviews;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::agents::context::SystemClock;
use crate::agents::orchestrator::Orchestrator;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{LlmClient, LlmSettings, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{PgRecordStore, RecordStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview Pilot API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;
    let store: Arc<dyn RecordStore> = Arc::new(PgRecordStore::new(db));

    // Initialize LLM client
    let llm_client = LlmClient::new(LlmSettings {
        api_key: config.llm_api_key.clone(),
        base_url: config.llm_base_url.clone(),
        model: config.llm_model.clone(),
        timeout: Duration::from_secs(config.llm_timeout_secs),
    })?;
    info!(
        "LLM client initialized (model: {}, base url: {})",
        llm_client.model(),
        config.llm_base_url
    );
    let llm: Arc<dyn TextGenerator> = Arc::new(llm_client);

    // Build app state
    let state = AppState {
        orchestrator: Orchestrator::new(store.clone(), llm.clone(), Arc::new(SystemClock)),
        store,
        llm,
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
