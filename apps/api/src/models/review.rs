use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewRow {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub summary: String,
    /// Self-assessment, expected 1–5 but stored as given.
    pub score: i32,
    pub improvement: String,
    pub created_at: DateTime<Utc>,
}

/// A user-submitted post-interview review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub summary: String,
    pub score: i32,
    #[serde(default)]
    pub improvement: String,
}
