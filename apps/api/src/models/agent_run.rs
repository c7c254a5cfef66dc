use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One dispatch of a routine. Rows are only ever inserted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AgentRunRow {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub agent_name: String,
    pub input_context: Value,
    pub output_result: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAgentRun<'a> {
    pub interview_id: Uuid,
    pub agent_name: &'a str,
    pub input_context: &'a Value,
    pub output_result: &'a Value,
}
