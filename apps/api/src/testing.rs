//! Test doubles: an in-memory `RecordStore`, a scripted `TextGenerator`
//! and a fixed clock.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::agents::context::Clock;
use crate::agents::orchestrator::Orchestrator;
use crate::errors::AppError;
use crate::llm_client::{ChatMessage, CompletionParams, LlmError, TextGenerator};
use crate::models::agent_run::{AgentRunRow, NewAgentRun};
use crate::models::interview::InterviewRow;
use crate::models::review::{NewReview, ReviewRow};
use crate::state::AppState;
use crate::store::RecordStore;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

#[derive(Default)]
struct Tables {
    interviews: Vec<InterviewRow>,
    reviews: Vec<ReviewRow>,
    runs: Vec<AgentRunRow>,
}

/// Vec-backed store. Insertion order stands in for `created_at` ordering.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn runs(&self) -> Vec<AgentRunRow> {
        self.tables.lock().unwrap().runs.clone()
    }
}

fn missing(interview_id: Uuid) -> AppError {
    AppError::NotFound(format!("Interview {interview_id} not found"))
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create_interview(
        &self,
        original_text: &str,
        interview_data: &Value,
    ) -> Result<InterviewRow, AppError> {
        let row = InterviewRow {
            id: Uuid::new_v4(),
            original_text: Some(original_text.to_string()),
            interview_data: interview_data.clone(),
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().interviews.push(row.clone());
        Ok(row)
    }

    async fn list_interviews(&self) -> Result<Vec<InterviewRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.interviews.iter().rev().cloned().collect())
    }

    async fn get_interview(&self, id: Uuid) -> Result<Option<InterviewRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.interviews.iter().find(|i| i.id == id).cloned())
    }

    async fn add_review(
        &self,
        interview_id: Uuid,
        review: &NewReview,
    ) -> Result<ReviewRow, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.interviews.iter().any(|i| i.id == interview_id) {
            return Err(missing(interview_id));
        }
        let row = ReviewRow {
            id: Uuid::new_v4(),
            interview_id,
            summary: review.summary.clone(),
            score: review.score,
            improvement: review.improvement.clone(),
            created_at: Utc::now(),
        };
        tables.reviews.push(row.clone());
        Ok(row)
    }

    async fn list_reviews(&self, interview_id: Uuid) -> Result<Vec<ReviewRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.interview_id == interview_id)
            .cloned()
            .collect())
    }

    async fn insert_agent_run(&self, run: NewAgentRun<'_>) -> Result<AgentRunRow, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.interviews.iter().any(|i| i.id == run.interview_id) {
            return Err(missing(run.interview_id));
        }
        let row = AgentRunRow {
            id: Uuid::new_v4(),
            interview_id: run.interview_id,
            agent_name: run.agent_name.to_string(),
            input_context: run.input_context.clone(),
            output_result: run.output_result.clone(),
            created_at: Utc::now(),
        };
        tables.runs.push(row.clone());
        Ok(row)
    }

    async fn list_agent_runs(
        &self,
        interview_id: Uuid,
        agent_name: Option<&str>,
    ) -> Result<Vec<AgentRunRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .runs
            .iter()
            .rev()
            .filter(|r| r.interview_id == interview_id)
            .filter(|r| agent_name.map_or(true, |name| r.agent_name == name))
            .cloned()
            .collect())
    }

    async fn latest_agent_run(
        &self,
        interview_id: Uuid,
        agent_name: &str,
    ) -> Result<Option<AgentRunRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .runs
            .iter()
            .rev()
            .find(|r| r.interview_id == interview_id && r.agent_name == agent_name)
            .cloned())
    }
}

/// Replays queued replies in order and records every request it receives.
/// An exhausted script answers with an upstream error.
#[derive(Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<(Vec<ChatMessage>, CompletionParams)>>,
}

impl ScriptedLlm {
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let llm = Self::default();
        for reply in replies {
            llm.push(Ok(reply.into()));
        }
        llm
    }

    pub fn failing() -> Self {
        let llm = Self::default();
        llm.push(Err(LlmError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        }));
        llm
    }

    pub fn push(&self, reply: Result<String, LlmError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<(Vec<ChatMessage>, CompletionParams)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Concatenated message contents of the `n`th request.
    pub fn prompt_text(&self, n: usize) -> String {
        self.requests.lock().unwrap()[n]
            .0
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl TextGenerator for ScriptedLlm {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: CompletionParams,
    ) -> Result<String, LlmError> {
        self.requests
            .lock()
            .unwrap()
            .push((messages.to_vec(), params));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::Api {
                    status: 503,
                    message: "no scripted reply left".to_string(),
                })
            })
    }
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Application state wired to in-memory doubles.
pub fn test_state(
    store: Arc<MemoryStore>,
    llm: Arc<ScriptedLlm>,
    today: NaiveDate,
) -> AppState {
    let store: Arc<dyn RecordStore> = store;
    let llm: Arc<dyn TextGenerator> = llm;
    AppState {
        orchestrator: Orchestrator::new(store.clone(), llm.clone(), Arc::new(FixedClock(today))),
        store,
        llm,
    }
}
