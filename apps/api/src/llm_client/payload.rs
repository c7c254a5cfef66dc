//! Locating the JSON document inside an LLM reply.
//!
//! Models are told to answer with bare JSON but regularly wrap it in a
//! markdown code fence, sometimes with a sentence of prose around it.
//! [`extract_json_payload`] accepts valid JSON as-is, unfenced text, or
//! text containing a single fenced block. Anything else is rejected rather
//! than guessed at.

use serde::de::IgnoredAny;
use thiserror::Error;

const FENCE: &str = "```";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("response contained no payload")]
    Empty,

    #[error("response opens a code fence that is never closed")]
    UnterminatedFence,

    #[error("response contains {0} fenced blocks, expected at most one")]
    Ambiguous(usize),
}

/// Returns the JSON text carried by `text`, without any surrounding fence.
///
/// A reply that already parses as JSON is returned whole, even when its
/// string values contain backticks. Otherwise fences only count as block
/// delimiters at the start of a line (or closing at the end of one).
pub fn extract_json_payload(text: &str) -> Result<&str, PayloadError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PayloadError::Empty);
    }
    if serde_json::from_str::<IgnoredAny>(text).is_ok() {
        return Ok(text);
    }

    let blocks = fenced_blocks(text)?;
    let payload = match blocks.as_slice() {
        [] => text,
        [block] => strip_language_tag(*block).trim(),
        _ => return Err(PayloadError::Ambiguous(blocks.len())),
    };

    if payload.is_empty() {
        return Err(PayloadError::Empty);
    }
    Ok(payload)
}

/// Collects the raw contents (info string included) of every fenced block.
fn fenced_blocks(text: &str) -> Result<Vec<&str>, PayloadError> {
    let mut blocks = Vec::new();
    let mut open: Option<usize> = None;
    let mut line_start = 0;

    for line in text.split_inclusive('\n') {
        let start = line_start;
        line_start += line.len();

        let trimmed = line.trim_start();
        let fence_at_start = trimmed.starts_with(FENCE);
        let indent = line.len() - trimmed.len();

        match open {
            None if fence_at_start => {
                let content_start = start + indent + FENCE.len();
                let same_line = text[content_start..start + line.len()].trim_end();
                match same_line.strip_suffix(FENCE) {
                    Some(inline) => blocks.push(inline),
                    None => open = Some(content_start),
                }
            }
            None => {}
            Some(content_start) if fence_at_start => {
                blocks.push(&text[content_start..start + indent]);
                open = None;
            }
            Some(content_start) => {
                if let Some(body) = line.trim_end().strip_suffix(FENCE) {
                    blocks.push(&text[content_start..start + body.len()]);
                    open = None;
                }
            }
        }
    }

    match open {
        Some(_) => Err(PayloadError::UnterminatedFence),
        None => Ok(blocks),
    }
}

/// Drops an info string such as `json` directly after the opening fence.
fn strip_language_tag(block: &str) -> &str {
    let tag_len = block
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .count();
    if tag_len == 0 {
        return block;
    }
    let rest = &block[tag_len..];
    if rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == '{' || c == '[') {
        rest
    } else {
        block
    }
}
