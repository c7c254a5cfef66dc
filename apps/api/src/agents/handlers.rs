use axum::{body::Bytes, extract::State};
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::agents::RoutineKind;
use crate::errors::AppError;
use crate::extract::{Json, Path, Query};
use crate::models::agent_run::AgentRunRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RunsQuery {
    pub routine: Option<String>,
}

/// POST /api/v1/agents/:routine/:id
///
/// The body is optional auxiliary input and must be a JSON object when present.
pub async fn handle_dispatch(
    State(state): State<AppState>,
    Path((routine, id)): Path<(String, Uuid)>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let kind: RoutineKind = routine.parse()?;
    let user_input = parse_user_input(&body)?;

    let result = state.orchestrator.dispatch(id, kind, user_input).await?;
    Ok(Json(result))
}

/// GET /api/v1/interviews/:id/runs?routine=<kind>
///
/// Newest first.
pub async fn handle_list_runs(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<RunsQuery>,
) -> Result<Json<Vec<AgentRunRow>>, AppError> {
    let kind = params
        .routine
        .as_deref()
        .map(str::parse::<RoutineKind>)
        .transpose()?;
    state.store.require_interview(id).await?;
    let runs = state
        .store
        .list_agent_runs(id, kind.map(RoutineKind::as_str))
        .await?;
    Ok(Json(runs))
}

/// GET /api/v1/interviews/:id/runs/:routine/latest
pub async fn handle_latest_run(
    State(state): State<AppState>,
    Path((id, routine)): Path<(Uuid, String)>,
) -> Result<Json<AgentRunRow>, AppError> {
    let kind: RoutineKind = routine.parse()?;
    state.store.require_interview(id).await?;
    let run = state
        .store
        .latest_agent_run(id, kind.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No {kind} run for interview {id}")))?;
    Ok(Json(run))
}

fn parse_user_input(body: &[u8]) -> Result<Map<String, Value>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::Validation(
            "request body must be a JSON object".to_string(),
        )),
        Err(e) => Err(AppError::Validation(format!("invalid JSON body: {e}"))),
    }
}
