//! JSON parsing helpers for provider responses
//!
//! These functions extract JSON from completion model responses, which
//! can include extra text before/after the JSON payload even in
//! structured-output mode.

use crate::error::{Error, Result};
use crate::models::Insight;

/// Parse an insight from a completion response
///
/// Finds the outermost JSON object in the response text and
/// deserializes it into the `Insight` contract shape.
pub fn parse_insight(response: &str) -> Result<Insight> {
    let json_str = extract_json(response)?;
    serde_json::from_str(json_str).map_err(|e| {
        // Truncate long responses for the error message
        let truncated = if json_str.len() > 200 {
            format!("{}...", truncate_at_char_boundary(json_str, 200))
        } else {
            json_str.to_string()
        };
        Error::InvalidData(format!(
            "Invalid insight JSON from provider: {} | Raw: {}",
            e, truncated
        ))
    })
}

/// Locate the outermost `{...}` object in a response
fn extract_json(response: &str) -> Result<&str> {
    let response = response.trim();

    let start = response.find('{');
    let end = response.rfind('}');

    match (start, end) {
        (Some(s), Some(e)) if s < e => Ok(&response[s..=e]),
        _ => Err(Error::InvalidData(format!(
            "No JSON found in provider response | Raw: {}",
            if response.len() > 200 {
                format!("{}...", truncate_at_char_boundary(response, 200))
            } else {
                response.to_string()
            }
        ))),
    }
}

/// Truncate without splitting a multi-byte character
fn truncate_at_char_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
