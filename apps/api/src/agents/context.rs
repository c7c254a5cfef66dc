//! Context assembly: turns a stored interview into the input every routine reads.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::agents::RoutineKind;
use crate::errors::AppError;
use crate::models::interview::InterviewRow;
use crate::models::review::ReviewRow;
use crate::store::RecordStore;

/// Source of "today" for date arithmetic.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A stored review as seen by the review and decision routines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewDigest {
    pub summary: String,
    pub score: i32,
    pub improvement: String,
}

impl From<&ReviewRow> for ReviewDigest {
    fn from(row: &ReviewRow) -> Self {
        Self {
            summary: row.summary.clone(),
            score: row.score,
            improvement: row.improvement.clone(),
        }
    }
}

/// Everything a routine gets to see. Persisted verbatim with each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineContext {
    pub company: Value,
    pub position: Value,
    pub process: Value,
    /// Serialized as `YYYY-MM-DD`.
    pub current_date: NaiveDate,
    pub user_input: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_reviews: Option<Vec<ReviewDigest>>,
}

impl RoutineContext {
    /// Builds the context from an already-loaded interview.
    /// `reviews` is `Some` only for routines that need history.
    pub fn from_interview(
        interview: &InterviewRow,
        reviews: Option<&[ReviewRow]>,
        user_input: Map<String, Value>,
        today: NaiveDate,
    ) -> Self {
        let data = &interview.interview_data;
        Self {
            company: section(data, "company"),
            position: section(data, "position"),
            process: section(data, "process"),
            current_date: today,
            user_input,
            history_reviews: reviews.map(|rows| rows.iter().map(ReviewDigest::from).collect()),
        }
    }

    pub fn company_name(&self) -> Option<&str> {
        non_empty_str(&self.company, "name")
    }

    pub fn position_title(&self) -> Option<&str> {
        non_empty_str(&self.position, "title")
    }

    pub fn reviews(&self) -> &[ReviewDigest] {
        self.history_reviews.as_deref().unwrap_or_default()
    }

    /// One numbered line per stored review, or "none".
    pub fn history_digest(&self) -> String {
        let reviews = self.reviews();
        if reviews.is_empty() {
            return "none".to_string();
        }
        reviews
            .iter()
            .enumerate()
            .map(|(i, r)| {
                format!(
                    "{}. (self-score {}/5) {}; to improve: {}",
                    i + 1,
                    r.score,
                    r.summary,
                    r.improvement
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_snapshot(&self) -> Result<Value, AppError> {
        serde_json::to_value(self).map_err(|e| AppError::Internal(e.into()))
    }
}

/// Loads the interview (and its reviews when `kind` needs them) and assembles
/// the routine context. Fails with `NotFound` for an unknown interview.
pub async fn assemble_context(
    store: &dyn RecordStore,
    interview_id: Uuid,
    kind: RoutineKind,
    user_input: Map<String, Value>,
    today: NaiveDate,
) -> Result<RoutineContext, AppError> {
    let interview = store.require_interview(interview_id).await?;

    let reviews = if kind.needs_history() {
        Some(store.list_reviews(interview_id).await?)
    } else {
        None
    };

    Ok(RoutineContext::from_interview(
        &interview,
        reviews.as_deref(),
        user_input,
        today,
    ))
}

/// A top-level payload section, or an empty mapping when missing or not an object.
fn section(data: &Value, key: &str) -> Value {
    match data.get(key) {
        Some(value @ Value::Object(_)) => value.clone(),
        _ => Value::Object(Map::new()),
    }
}

pub(crate) fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
