//! Decision routine: evaluation matrix and recommendation for an offer.

use serde_json::Value;

use crate::agents::context::RoutineContext;
use crate::agents::prompts::{DECISION_PROMPT, DECISION_ROLE, DECISION_SCHEMA};
use crate::errors::AppError;
use crate::llm_client::prompts::{json_system_prompt, render_prompt};
use crate::llm_client::{complete_json, ChatMessage, CompletionParams, TextGenerator};

const TEMPERATURE: f32 = 0.5;

pub async fn run(ctx: &RoutineContext, llm: &dyn TextGenerator) -> Result<Value, AppError> {
    let history = ctx.history_digest();
    let prompt = render_prompt(
        DECISION_PROMPT,
        &[
            ("company", ctx.company_name().unwrap_or("unknown")),
            ("position", ctx.position_title().unwrap_or("unknown")),
            ("history", history.as_str()),
        ],
    );

    let messages = [
        ChatMessage::system(json_system_prompt(DECISION_ROLE, DECISION_SCHEMA)),
        ChatMessage::user(prompt),
    ];

    let verdict =
        complete_json(llm, &messages, CompletionParams::with_temperature(TEMPERATURE)).await?;
    Ok(verdict)
}
