//! Tolerant parsing of planner model output into steps.
//!
//! The model output channel is noisy, so entries missing a `tool` are dropped
//! rather than rejected, and `args` falls back to an empty object when absent
//! or not an object.

use serde_json::{Map, Value};

use crate::engine::Step;

/// Parse model output into steps.
///
/// A JSON array of objects yields one step per well-formed entry; a single
/// top-level object is a one-element plan; any other JSON shape yields zero
/// steps. Malformed JSON is a parse error (surfaced as a planning failure).
pub fn parse_steps(text: &str) -> Result<Vec<Step>, serde_json::Error> {
    let content = extract_from_markdown(text.trim());
    let parsed: Value = serde_json::from_str(content.trim())?;

    let entries = match parsed {
        Value::Array(items) => items,
        Value::Object(_) => vec![parsed],
        _ => Vec::new(),
    };

    let mut steps = Vec::new();
    for entry in entries {
        let Value::Object(map) = entry else {
            continue;
        };
        let Some(tool_value) = map.get("tool") else {
            // Tolerate noisy output: drop entries without a tool.
            continue;
        };
        let tool = match tool_value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let args = match map.get("args") {
            Some(Value::Object(args)) => args.clone(),
            _ => Map::new(),
        };
        steps.push(Step { tool, args });
    }

    Ok(steps)
}

/// Strip a markdown code fence (```json ... ``` or ``` ... ```) if present.
fn extract_from_markdown(text: &str) -> &str {
    let Some(start) = text.find("```") else {
        return text;
    };
    let after = &text[start + 3..];
    let Some(end) = after.find("```") else {
        return text;
    };
    let inner = &after[..end];

    // Skip a language identifier line such as "json".
    match inner.split_once('\n') {
        Some((first, rest))
            if !first.trim().is_empty() && !first.trim_start().starts_with(['[', '{']) =>
        {
            rest
        }
        _ => inner,
    }
}
