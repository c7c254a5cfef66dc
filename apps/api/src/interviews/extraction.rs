//! Interview ingestion: free text in, structured record out.

use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interviews::prompts::EXTRACTION_SYSTEM;
use crate::llm_client::{parse_json_object, ChatMessage, CompletionParams, TextGenerator};
use crate::models::interview::{InterviewData, InterviewRow};
use crate::models::review::{NewReview, ReviewRow};
use crate::store::RecordStore;

/// Extracts the structured payload from a notification.
///
/// An unusable reply degrades to [`InterviewData::unparsed`]; only a failed
/// call to the LLM is an error.
pub async fn extract_interview(raw_text: &str, llm: &dyn TextGenerator) -> Result<Value, AppError> {
    let messages = [
        ChatMessage::system(EXTRACTION_SYSTEM),
        ChatMessage::user(raw_text),
    ];
    let reply = llm.complete(&messages, CompletionParams::default()).await?;

    match parse_json_object(&reply) {
        Ok(payload) => Ok(payload),
        Err(e) => {
            warn!("Extraction reply could not be parsed, storing placeholder payload: {e}");
            serde_json::to_value(InterviewData::unparsed()).map_err(|e| AppError::Internal(e.into()))
        }
    }
}

/// Extracts and stores a new interview record.
pub async fn ingest_interview(
    store: &dyn RecordStore,
    llm: &dyn TextGenerator,
    raw_text: &str,
) -> Result<InterviewRow, AppError> {
    if raw_text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let payload = extract_interview(raw_text, llm).await?;
    let row = store.create_interview(raw_text, &payload).await?;

    info!("Created interview {}", row.id);
    Ok(row)
}

/// Stores a review against an existing interview.
pub async fn submit_review(
    store: &dyn RecordStore,
    interview_id: Uuid,
    review: &NewReview,
) -> Result<ReviewRow, AppError> {
    store.require_interview(interview_id).await?;
    store.add_review(interview_id, review).await
}
