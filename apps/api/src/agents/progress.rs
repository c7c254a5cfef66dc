//! Progress routine: date-driven reminders plus one optional LLM tip.
//!
//! Day deltas are computed locally; only the tip for the nearest round goes
//! to the LLM, and a failed tip never fails the routine.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::agents::context::RoutineContext;
use crate::agents::prompts::PROGRESS_TIP_PROMPT;
use crate::errors::AppError;
use crate::llm_client::prompts::render_prompt;
use crate::llm_client::{ChatMessage, CompletionParams, LlmError, TextGenerator};
use crate::models::interview::{timeline_entries, TimelineEntry};

pub const NO_UPCOMING_REMINDER: &str = "No upcoming interviews scheduled";

/// Rounds further out than this get no reminder.
const REMINDER_WINDOW_DAYS: i64 = 3;
const TIP_MAX_TOKENS: u32 = 60;

#[derive(Debug, Serialize)]
pub struct ProgressReport {
    pub reminders: Vec<String>,
    /// Calendar-conflict detection is not implemented; always empty.
    pub conflicts: Vec<Value>,
}

pub async fn run(ctx: &RoutineContext, llm: &dyn TextGenerator) -> Result<Value, AppError> {
    let entries = timeline_entries(&ctx.process);
    let mut reminders = Vec::new();
    let mut upcoming: Option<(i64, &TimelineEntry)> = None;

    for entry in &entries {
        let Some(event_date) = entry.parsed_date() else {
            continue;
        };
        let days_until = (event_date - ctx.current_date).num_days();
        let Some(text) = reminder_text(entry.stage_name(), days_until) else {
            continue;
        };
        reminders.push(text);
        if upcoming.map_or(true, |(nearest, _)| days_until < nearest) {
            upcoming = Some((days_until, entry));
        }
    }

    if let Some((_, entry)) = upcoming {
        match fetch_tip(ctx, entry, llm).await {
            Ok(Some(tip)) => reminders.push(format!("💡 AI tip: {tip}")),
            Ok(None) => {}
            Err(e) => warn!("Progress tip skipped: {e}"),
        }
    }

    if reminders.is_empty() {
        reminders.push(NO_UPCOMING_REMINDER.to_string());
    }

    let report = ProgressReport {
        reminders,
        conflicts: vec![],
    };
    serde_json::to_value(report).map_err(|e| AppError::Internal(e.into()))
}

fn reminder_text(stage: &str, days_until: i64) -> Option<String> {
    match days_until {
        0 => Some(format!(
            "[Today] {stage}: stay confident and check your network and setup!"
        )),
        1 => Some(format!(
            "[Tomorrow] {stage}: go through your prep pack and review your resume."
        )),
        2..=REMINDER_WINDOW_DAYS => Some(format!(
            "[In {days_until} days] {stage}: there is still time to prepare."
        )),
        _ => None,
    }
}

async fn fetch_tip(
    ctx: &RoutineContext,
    entry: &TimelineEntry,
    llm: &dyn TextGenerator,
) -> Result<Option<String>, LlmError> {
    let prompt = render_prompt(
        PROGRESS_TIP_PROMPT,
        &[
            ("stage", entry.stage_name()),
            ("company", ctx.company_name().unwrap_or("the company")),
        ],
    );
    let params = CompletionParams {
        max_tokens: TIP_MAX_TOKENS,
        ..CompletionParams::default()
    };

    let tip = llm.complete(&[ChatMessage::user(prompt)], params).await?;
    let tip = tip.trim().trim_matches('"').trim();
    Ok((!tip.is_empty()).then(|| tip.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, ScriptedLlm};
    use chrono::{Duration, NaiveDate};
    use serde_json::{json, Map};

    fn ctx_with_timeline(today: NaiveDate, timeline: Value) -> RoutineContext {
        RoutineContext {
            company: json!({"name": "Acme Corp"}),
            position: json!({"title": "Backend Engineer"}),
            process: json!({"timeline": timeline}),
            current_date: today,
            user_input: Map::new(),
            history_reviews: None,
        }
    }

    fn iso(d: NaiveDate) -> String {
        d.format("%Y-%m-%d").to_string()
    }

    fn reminders(result: &Value) -> Vec<String> {
        result["reminders"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_today_tomorrow_three_days_but_not_four() {
        let today = date(2025, 5, 31);
        let ctx = ctx_with_timeline(
            today,
            json!([
                {"stage": "HR screen", "date": iso(today)},
                {"stage": "Tech round", "date": iso(today + Duration::days(1))},
                {"stage": "System design", "date": iso(today + Duration::days(3))},
                {"stage": "Final round", "date": iso(today + Duration::days(4))}
            ]),
        );
        let llm = ScriptedLlm::replying(["Breathe, and lead with your strongest project."]);

        let result = run(&ctx, &llm).await.unwrap();
        let reminders = reminders(&result);

        assert_eq!(reminders.len(), 4);
        assert!(reminders[0].contains("Today") && reminders[0].contains("HR screen"));
        assert!(reminders[1].contains("Tomorrow") && reminders[1].contains("Tech round"));
        assert!(reminders[2].contains("3 days") && reminders[2].contains("System design"));
        assert!(reminders[3].contains("Breathe"));
        assert!(!reminders.iter().any(|r| r.contains("Final round")));
        assert_eq!(result["conflicts"], json!([]));
    }

    #[tokio::test]
    async fn test_tip_targets_nearest_round() {
        let today = date(2025, 5, 31);
        let ctx = ctx_with_timeline(
            today,
            json!([
                {"stage": "Onsite", "date": iso(today + Duration::days(3))},
                {"stage": "Phone screen", "date": iso(today + Duration::days(1))}
            ]),
        );
        let llm = ScriptedLlm::replying(["\"You've got this.\""]);

        let result = run(&ctx, &llm).await.unwrap();

        assert_eq!(llm.call_count(), 1);
        let prompt = llm.prompt_text(0);
        assert!(prompt.contains("Phone screen"));
        assert!(prompt.contains("Acme Corp"));
        assert_eq!(llm.requests()[0].1.max_tokens, 60);
        assert_eq!(reminders(&result).last().unwrap(), "💡 AI tip: You've got this.");
    }

    #[tokio::test]
    async fn test_tip_failure_is_swallowed() {
        let today = date(2025, 5, 31);
        let ctx = ctx_with_timeline(today, json!([{"stage": "Tech round", "date": iso(today)}]));
        let llm = ScriptedLlm::failing();

        let result = run(&ctx, &llm).await.unwrap();
        let reminders = reminders(&result);

        assert_eq!(reminders.len(), 1);
        assert!(reminders[0].contains("Today"));
    }

    #[tokio::test]
    async fn test_blank_tip_is_omitted() {
        let today = date(2025, 5, 31);
        let ctx = ctx_with_timeline(today, json!([{"stage": "Tech round", "date": iso(today)}]));
        let llm = ScriptedLlm::replying(["   "]);

        let result = run(&ctx, &llm).await.unwrap();
        assert_eq!(reminders(&result).len(), 1);
    }

    #[tokio::test]
    async fn test_empty_timeline_returns_placeholder() {
        let ctx = ctx_with_timeline(date(2025, 5, 31), json!([]));
        let llm = ScriptedLlm::default();

        let result = run(&ctx, &llm).await.unwrap();

        assert_eq!(result["reminders"], json!([NO_UPCOMING_REMINDER]));
        assert_eq!(result["conflicts"], json!([]));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unparseable_dates_are_skipped() {
        let ctx = ctx_with_timeline(
            date(2025, 5, 31),
            json!([
                {"stage": "HR", "date": "next Tuesday"},
                {"stage": "Tech", "date": ""},
                {"stage": "Final"},
                {"stage": "Offer call", "date": "2025/06/01"}
            ]),
        );
        let llm = ScriptedLlm::default();

        let result = run(&ctx, &llm).await.unwrap();

        assert_eq!(result["reminders"], json!([NO_UPCOMING_REMINDER]));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_non_string_time_does_not_hide_a_dated_round() {
        let ctx = ctx_with_timeline(
            date(2025, 5, 31),
            json!([{"stage": "Tech round", "date": "2025-06-01", "time": 1400, "link": []}]),
        );
        let llm = ScriptedLlm::replying(["Sleep well."]);

        let result = run(&ctx, &llm).await.unwrap();
        let reminders = reminders(&result);

        assert!(reminders[0].starts_with("[Tomorrow] Tech round"));
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_process_returns_placeholder() {
        let mut ctx = ctx_with_timeline(date(2025, 5, 31), json!([]));
        ctx.process = json!({});
        let result = run(&ctx, &ScriptedLlm::default()).await.unwrap();
        assert_eq!(result["reminders"], json!([NO_UPCOMING_REMINDER]));
    }

    #[test]
    fn test_reminder_text_window() {
        assert!(reminder_text("R", -1).is_none());
        assert!(reminder_text("R", 0).unwrap().contains("Today"));
        assert!(reminder_text("R", 1).unwrap().contains("Tomorrow"));
        assert!(reminder_text("R", 2).unwrap().contains("2 days"));
        assert!(reminder_text("R", 3).unwrap().contains("3 days"));
        assert!(reminder_text("R", 4).is_none());
    }
}
