use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{Json, Path};
use crate::interviews::extraction::{ingest_interview, submit_review};
use crate::models::interview::InterviewRow;
use crate::models::review::{NewReview, ReviewRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateInterviewRequest {
    pub text: String,
}

/// GET /api/v1/interviews
pub async fn handle_list_interviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<InterviewRow>>, AppError> {
    Ok(Json(state.store.list_interviews().await?))
}

/// POST /api/v1/interviews
pub async fn handle_create_interview(
    State(state): State<AppState>,
    Json(req): Json<CreateInterviewRequest>,
) -> Result<(StatusCode, Json<InterviewRow>), AppError> {
    let row = ingest_interview(state.store.as_ref(), state.llm.as_ref(), &req.text).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewRow>, AppError> {
    Ok(Json(state.store.require_interview(id).await?))
}

/// POST /api/v1/interviews/:id/reviews
pub async fn handle_add_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(review): Json<NewReview>,
) -> Result<(StatusCode, Json<ReviewRow>), AppError> {
    let row = submit_review(state.store.as_ref(), id, &review).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/interviews/:id/reviews
pub async fn handle_list_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ReviewRow>>, AppError> {
    state.store.require_interview(id).await?;
    Ok(Json(state.store.list_reviews(id).await?))
}
