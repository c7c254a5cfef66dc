use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub original_text: Option<String>,
    /// Structured payload as produced by extraction. Never updated.
    pub interview_data: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub name: String,
    pub industry: String,
    pub scale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub title: String,
    pub department: String,
    #[serde(alias = "jd_keywords")]
    pub keywords: Vec<String>,
    #[serde(alias = "jd_summary")]
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Process {
    pub current_stage: String,
    pub timeline: Vec<TimelineEntry>,
}

/// One scheduled round. Every field is optional because extraction output
/// is only as complete as the source text. Scalars of the wrong type are
/// read as text and anything else as absent, so a stray `"time": 1400`
/// never costs the round its date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineEntry {
    #[serde(deserialize_with = "lenient_text")]
    pub stage: Option<String>,
    /// `YYYY-MM-DD` when well formed.
    #[serde(deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub time: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

impl TimelineEntry {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
    }

    pub fn stage_name(&self) -> &str {
        self.stage
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("Interview")
    }
}

/// The structured payload stored on every interview record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewData {
    pub company: Company,
    pub position: Position,
    pub process: Process,
}

impl InterviewData {
    /// Payload recorded when the extractor's reply cannot be decoded.
    pub fn unparsed() -> Self {
        Self {
            company: Company {
                name: "Unparsed".to_string(),
                ..Company::default()
            },
            position: Position {
                title: "Unknown position".to_string(),
                ..Position::default()
            },
            process: Process::default(),
        }
    }
}

/// Reads the timeline out of a `process` mapping, dropping entries that
/// are not objects.
pub fn timeline_entries(process: &Value) -> Vec<TimelineEntry> {
    process
        .get("timeline")
        .and_then(|t| t.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
