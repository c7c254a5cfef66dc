//! Review routine: turns a debrief into per-skill scores and next actions.
//!
//! Analyses the debrief submitted with the dispatch (`user_input`). When the
//! caller sends none, the most recent stored review stands in.

use serde_json::Value;

use crate::agents::context::{non_empty_str, RoutineContext};
use crate::agents::prompts::{REVIEW_PROMPT, REVIEW_ROLE, REVIEW_SCHEMA};
use crate::errors::AppError;
use crate::llm_client::prompts::{json_system_prompt, render_prompt};
use crate::llm_client::{complete_json, ChatMessage, CompletionParams, TextGenerator};

const TEMPERATURE: f32 = 0.3;
const DEFAULT_SUMMARY: &str = "The candidate did not provide a detailed summary";
const DEFAULT_SCORE: i64 = 3;

#[derive(Debug, PartialEq)]
struct Debrief {
    summary: String,
    score: String,
    improvement: String,
}

pub async fn run(ctx: &RoutineContext, llm: &dyn TextGenerator) -> Result<Value, AppError> {
    let debrief = debrief(ctx);
    let history = ctx.history_digest();
    let prompt = render_prompt(
        REVIEW_PROMPT,
        &[
            ("score", debrief.score.as_str()),
            ("summary", debrief.summary.as_str()),
            ("improvement", debrief.improvement.as_str()),
            ("history", history.as_str()),
        ],
    );

    let messages = [
        ChatMessage::system(json_system_prompt(REVIEW_ROLE, REVIEW_SCHEMA)),
        ChatMessage::user(prompt),
    ];

    let analysis =
        complete_json(llm, &messages, CompletionParams::with_temperature(TEMPERATURE)).await?;
    Ok(analysis)
}

fn debrief(ctx: &RoutineContext) -> Debrief {
    let input = Value::Object(ctx.user_input.clone());
    if let Some(summary) = non_empty_str(&input, "summary") {
        return Debrief {
            summary: summary.to_string(),
            score: score_text(input.get("score")),
            improvement: non_empty_str(&input, "improvement")
                .unwrap_or("none noted")
                .to_string(),
        };
    }

    match ctx.reviews().last() {
        Some(latest) => Debrief {
            summary: latest.summary.clone(),
            score: latest.score.to_string(),
            improvement: latest.improvement.clone(),
        },
        None => Debrief {
            summary: DEFAULT_SUMMARY.to_string(),
            score: score_text(input.get("score")),
            improvement: "none noted".to_string(),
        },
    }
}

fn score_text(score: Option<&Value>) -> String {
    match score {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => DEFAULT_SCORE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::context::ReviewDigest;
    use crate::testing::{date, ScriptedLlm};
    use serde_json::{json, Map};

    const ANALYSIS: &str = r#"{"skills": {"Communication": 3, "Technical depth": 4}, "weakness": "Rambling answers", "actions": ["Practise 2-minute answers"]}"#;

    fn ctx(user_input: Value, history: Vec<ReviewDigest>) -> RoutineContext {
        RoutineContext {
            company: json!({"name": "Acme Corp"}),
            position: json!({}),
            process: json!({}),
            current_date: date(2025, 6, 2),
            user_input: user_input.as_object().cloned().unwrap_or_else(Map::new),
            history_reviews: Some(history),
        }
    }

    fn digest(summary: &str, score: i32) -> ReviewDigest {
        ReviewDigest {
            summary: summary.to_string(),
            score,
            improvement: "slow down".to_string(),
        }
    }

    #[tokio::test]
    async fn test_review_analysis_parsed() {
        let llm = ScriptedLlm::replying([format!("```json\n{ANALYSIS}\n```")]);
        let result = run(&ctx(json!({"summary": "Went OK", "score": 4}), vec![]), &llm)
            .await
            .unwrap();

        assert_eq!(result["skills"]["Technical depth"], 4);
        assert_eq!(result["weakness"], "Rambling answers");
        assert!((llm.requests()[0].1.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_prompt_uses_submitted_debrief_and_history() {
        let llm = ScriptedLlm::replying([ANALYSIS]);
        let ctx = ctx(
            json!({"summary": "Froze on the graph question", "score": 2}),
            vec![digest("Phone screen went fine", 4)],
        );
        run(&ctx, &llm).await.unwrap();

        let prompt = llm.prompt_text(0);
        assert!(prompt.contains("Self-score: 2/5"));
        assert!(prompt.contains("Froze on the graph question"));
        assert!(prompt.contains("Phone screen went fine"));
    }

    #[tokio::test]
    async fn test_placeholder_text_in_debrief_is_not_expanded() {
        let llm = ScriptedLlm::replying([ANALYSIS]);
        let ctx = ctx(
            json!({"summary": "They asked me to fill in {history} on a form", "score": 3}),
            vec![digest("Phone screen went fine", 4)],
        );
        run(&ctx, &llm).await.unwrap();

        let prompt = llm.prompt_text(0);
        assert!(prompt.contains("They asked me to fill in {history} on a form"));
        assert_eq!(prompt.matches("Phone screen went fine").count(), 1);
    }

    #[test]
    fn test_debrief_falls_back_to_latest_stored_review() {
        let ctx = ctx(json!({}), vec![digest("older", 2), digest("newest", 5)]);
        let d = debrief(&ctx);
        assert_eq!(d.summary, "newest");
        assert_eq!(d.score, "5");
        assert_eq!(d.improvement, "slow down");
    }

    #[test]
    fn test_debrief_defaults_without_any_review() {
        let d = debrief(&ctx(json!({}), vec![]));
        assert_eq!(d.summary, DEFAULT_SUMMARY);
        assert_eq!(d.score, "3");
    }

    #[test]
    fn test_score_text_accepts_strings() {
        assert_eq!(score_text(Some(&json!("4"))), "4");
        assert_eq!(score_text(Some(&json!(null))), "3");
        assert_eq!(score_text(None), "3");
    }

    #[tokio::test]
    async fn test_malformed_reply() {
        let llm = ScriptedLlm::replying(["```json\n{\"skills\": \n```"]);
        let err = run(&ctx(json!({}), vec![]), &llm).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedOutput(_)));
    }
}
