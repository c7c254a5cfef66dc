//! Prep routine: checklist and mock interview script for the role.

use serde_json::Value;

use crate::agents::context::RoutineContext;
use crate::agents::prompts::{COACH_PROMPT, COACH_ROLE, COACH_SCHEMA};
use crate::errors::AppError;
use crate::llm_client::prompts::{json_system_prompt, render_prompt};
use crate::llm_client::{complete_json, ChatMessage, CompletionParams, TextGenerator};

const TEMPERATURE: f32 = 0.5;

pub async fn run(ctx: &RoutineContext, llm: &dyn TextGenerator) -> Result<Value, AppError> {
    let keywords = keyword_list(&ctx.position);
    let prompt = render_prompt(
        COACH_PROMPT,
        &[
            ("company", ctx.company_name().unwrap_or("the target company")),
            ("position", ctx.position_title().unwrap_or("the role")),
            ("keywords", keywords.as_str()),
        ],
    );

    let messages = [
        ChatMessage::system(json_system_prompt(COACH_ROLE, COACH_SCHEMA)),
        ChatMessage::user(prompt),
    ];

    let plan = complete_json(llm, &messages, CompletionParams::with_temperature(TEMPERATURE)).await?;
    Ok(plan)
}

/// Keywords may arrive as a list or a single string, under either field name.
fn keyword_list(position: &Value) -> String {
    let raw = position
        .get("keywords")
        .or_else(|| position.get("jd_keywords"));
    let list = match raw {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    };
    if list.is_empty() {
        "none listed".to_string()
    } else {
        list
    }
}
