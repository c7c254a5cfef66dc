// Shared prompt fragments.
// Each module that needs LLM calls defines its own prompts.rs alongside it.

/// Appended to every system prompt that expects structured output.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Builds a system prompt from a role description, the JSON-only rule and
/// an example of the expected output shape.
pub fn json_system_prompt(role: &str, schema: &str) -> String {
    format!("{role}\n{JSON_ONLY_INSTRUCTION}\nReturn exactly this structure:\n{schema}")
}

/// Fills `{name}` placeholders in a single pass. Substituted values are
/// never scanned again, so user text containing `{history}` stays literal.
/// Braces that do not name a variable are copied through.
pub fn render_prompt(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let hit = tail.find('}').and_then(|close| {
            let name = &tail[1..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });
        match hit {
            Some((close, value)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
