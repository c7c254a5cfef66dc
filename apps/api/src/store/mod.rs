//! Record persistence.
//!
//! Handlers and the orchestrator only see `Arc<dyn RecordStore>`; the
//! PostgreSQL implementation lives in [`postgres`].

pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::agent_run::{AgentRunRow, NewAgentRun};
use crate::models::interview::InterviewRow;
use crate::models::review::{NewReview, ReviewRow};

pub use postgres::PgRecordStore;

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_interview(
        &self,
        original_text: &str,
        interview_data: &Value,
    ) -> Result<InterviewRow, AppError>;

    /// All interviews, newest first.
    async fn list_interviews(&self) -> Result<Vec<InterviewRow>, AppError>;

    async fn get_interview(&self, id: Uuid) -> Result<Option<InterviewRow>, AppError>;

    /// Like [`RecordStore::get_interview`], but an unknown id is `NotFound`.
    async fn require_interview(&self, id: Uuid) -> Result<InterviewRow, AppError> {
        self.get_interview(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))
    }

    async fn add_review(
        &self,
        interview_id: Uuid,
        review: &NewReview,
    ) -> Result<ReviewRow, AppError>;

    /// Reviews for one interview in the order they were stored.
    async fn list_reviews(&self, interview_id: Uuid) -> Result<Vec<ReviewRow>, AppError>;

    async fn insert_agent_run(&self, run: NewAgentRun<'_>) -> Result<AgentRunRow, AppError>;

    /// Runs for one interview, newest first, optionally restricted to one routine.
    async fn list_agent_runs(
        &self,
        interview_id: Uuid,
        agent_name: Option<&str>,
    ) -> Result<Vec<AgentRunRow>, AppError>;

    /// The most recent run of `agent_name` for one interview.
    async fn latest_agent_run(
        &self,
        interview_id: Uuid,
        agent_name: &str,
    ) -> Result<Option<AgentRunRow>, AppError>;
}
