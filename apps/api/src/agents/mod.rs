//! Advisory routines and the orchestrator that dispatches them.
//!
//! Flow: resolve interview → assemble context → run routine → append an
//! `agent_runs` row → return the routine's JSON result.
//! All LLM calls go through `llm_client::TextGenerator`.

pub mod coach;
pub mod context;
pub mod decision;
pub mod handlers;
pub mod orchestrator;
pub mod progress;
pub mod prompts;
pub mod review;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The closed set of routines a dispatch can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutineKind {
    /// Date-driven reminders for upcoming rounds.
    Progress,
    /// Preparation checklist and mock questions.
    Prep,
    /// Skill breakdown of a submitted review.
    Review,
    /// Offer evaluation matrix.
    Decision,
}

impl RoutineKind {
    pub const ALL: [RoutineKind; 4] = [
        RoutineKind::Progress,
        RoutineKind::Prep,
        RoutineKind::Review,
        RoutineKind::Decision,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoutineKind::Progress => "progress",
            RoutineKind::Prep => "prep",
            RoutineKind::Review => "review",
            RoutineKind::Decision => "decision",
        }
    }

    /// Whether the assembled context carries the interview's review history.
    pub fn needs_history(self) -> bool {
        matches!(self, RoutineKind::Review | RoutineKind::Decision)
    }
}

impl fmt::Display for RoutineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoutineKind {
    type Err = AppError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoutineKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::UnknownRoutine(s.to_string()))
    }
}
