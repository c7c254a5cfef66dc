use std::sync::Arc;

use crate::agents::orchestrator::Orchestrator;
use crate::llm_client::TextGenerator;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    /// Used directly only by ingestion; routines get it through the orchestrator.
    pub llm: Arc<dyn TextGenerator>,
    pub orchestrator: Orchestrator,
}
