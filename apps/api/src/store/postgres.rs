use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::agent_run::{AgentRunRow, NewAgentRun};
use crate::models::interview::InterviewRow;
use crate::models::review::{NewReview, ReviewRow};
use crate::store::RecordStore;

// Reads order by `seq` (a BIGSERIAL) so rows inserted within the same
// timestamp keep their insertion order.

const LIST_INTERVIEWS: &str = "SELECT * FROM interviews ORDER BY seq DESC";

const LIST_REVIEWS: &str =
    "SELECT * FROM interview_reviews WHERE interview_id = $1 ORDER BY seq";

const LIST_AGENT_RUNS: &str = r#"
    SELECT * FROM agent_runs
    WHERE interview_id = $1 AND ($2::TEXT IS NULL OR agent_name = $2)
    ORDER BY seq DESC
"#;

const LATEST_AGENT_RUN: &str = r#"
    SELECT * FROM agent_runs
    WHERE interview_id = $1 AND agent_name = $2
    ORDER BY seq DESC
    LIMIT 1
"#;

/// `RecordStore` backed by PostgreSQL. Every write is a single INSERT.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create_interview(
        &self,
        original_text: &str,
        interview_data: &Value,
    ) -> Result<InterviewRow, AppError> {
        let row = sqlx::query_as::<_, InterviewRow>(
            r#"
            INSERT INTO interviews (id, original_text, interview_data)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(original_text)
        .bind(interview_data)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_interviews(&self) -> Result<Vec<InterviewRow>, AppError> {
        let rows = sqlx::query_as::<_, InterviewRow>(LIST_INTERVIEWS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_interview(&self, id: Uuid) -> Result<Option<InterviewRow>, AppError> {
        let row = sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn add_review(
        &self,
        interview_id: Uuid,
        review: &NewReview,
    ) -> Result<ReviewRow, AppError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO interview_reviews (id, interview_id, summary, score, improvement)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(interview_id)
        .bind(&review.summary)
        .bind(review.score)
        .bind(&review.improvement)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_reviews(&self, interview_id: Uuid) -> Result<Vec<ReviewRow>, AppError> {
        let rows = sqlx::query_as::<_, ReviewRow>(LIST_REVIEWS)
            .bind(interview_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert_agent_run(&self, run: NewAgentRun<'_>) -> Result<AgentRunRow, AppError> {
        let row = sqlx::query_as::<_, AgentRunRow>(
            r#"
            INSERT INTO agent_runs (id, interview_id, agent_name, input_context, output_result)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(run.interview_id)
        .bind(run.agent_name)
        .bind(run.input_context)
        .bind(run.output_result)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_agent_runs(
        &self,
        interview_id: Uuid,
        agent_name: Option<&str>,
    ) -> Result<Vec<AgentRunRow>, AppError> {
        let rows = sqlx::query_as::<_, AgentRunRow>(LIST_AGENT_RUNS)
            .bind(interview_id)
            .bind(agent_name)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn latest_agent_run(
        &self,
        interview_id: Uuid,
        agent_name: &str,
    ) -> Result<Option<AgentRunRow>, AppError> {
        let row = sqlx::query_as::<_, AgentRunRow>(LATEST_AGENT_RUN)
            .bind(interview_id)
            .bind(agent_name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
