//! Orchestrator: the dispatch facade.
//!
//! Steps:
//! 1. assemble_context() → RoutineContext (fails NotFound for an unknown interview)
//! 2. run the routine selected by `RoutineKind`
//! 3. INSERT into agent_runs (context snapshot + result)
//! 4. return the result
//!
//! A failing routine writes nothing. There is no retry and no deduplication:
//! concurrent dispatches for the same interview each run and each append a row.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::agents::context::{assemble_context, Clock, RoutineContext};
use crate::agents::{coach, decision, progress, review, RoutineKind};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::agent_run::NewAgentRun;
use crate::store::RecordStore;

#[derive(Clone)]
pub struct Orchestrator {
    store: Arc<dyn RecordStore>,
    llm: Arc<dyn TextGenerator>,
    clock: Arc<dyn Clock>,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn RecordStore>,
        llm: Arc<dyn TextGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { store, llm, clock }
    }

    pub async fn dispatch(
        &self,
        interview_id: Uuid,
        kind: RoutineKind,
        user_input: Map<String, Value>,
    ) -> Result<Value, AppError> {
        let context = assemble_context(
            self.store.as_ref(),
            interview_id,
            kind,
            user_input,
            self.clock.today(),
        )
        .await?;

        let result = run_routine(kind, &context, self.llm.as_ref()).await?;

        let snapshot = context.to_snapshot()?;
        let run = self
            .store
            .insert_agent_run(NewAgentRun {
                interview_id,
                agent_name: kind.as_str(),
                input_context: &snapshot,
                output_result: &result,
            })
            .await?;

        info!("Routine {kind} finished for interview {interview_id} (run {})", run.id);
        Ok(result)
    }
}

/// The routine registry: one handler per `RoutineKind`.
async fn run_routine(
    kind: RoutineKind,
    context: &RoutineContext,
    llm: &dyn TextGenerator,
) -> Result<Value, AppError> {
    match kind {
        RoutineKind::Progress => progress::run(context, llm).await,
        RoutineKind::Prep => coach::run(context, llm).await,
        RoutineKind::Review => review::run(context, llm).await,
        RoutineKind::Decision => decision::run(context, llm).await,
    }
}
