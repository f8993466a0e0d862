use serde_json::Value;

use super::StructuringError;

/// Wrapper keys some models put around the note object.
const WRAPPER_KEYS: [&str; 2] = ["structuredNote", "note"];

/// Extract the note payload from an LLM completion.
///
/// Accepts a ```json fenced block, a bare fenced block, or raw text with a
/// JSON object somewhere in it. A single-key `{"structuredNote": {...}}` or
/// `{"note": {...}}` wrapper is unwrapped.
pub fn parse_note_payload(response: &str) -> Result<Value, StructuringError> {
    let json_str = extract_json_block(response)?;
    let value: Value =
        serde_json::from_str(json_str).map_err(|e| StructuringError::JsonParsing(e.to_string()))?;
    Ok(unwrap_payload(value))
}

/// Locate the JSON text inside a completion.
fn extract_json_block(response: &str) -> Result<&str, StructuringError> {
    if let Some(block) = fenced_block(response) {
        if !block.is_empty() {
            return Ok(block);
        }
    }

    let start = response
        .find('{')
        .ok_or_else(|| StructuringError::MalformedResponse("No JSON object found".into()))?;
    let end = response
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| StructuringError::MalformedResponse("Unclosed JSON object".into()))?;

    Ok(&response[start..=end])
}

/// Contents of the first ``` fence, with its info string (`json`, `javascript`, ...) dropped.
fn fenced_block(response: &str) -> Option<&str> {
    let fence_start = response.find("```")?;
    let after_fence = &response[fence_start + 3..];
    let content = match after_fence.split_once('\n') {
        Some((info, rest)) if !info.trim_start().starts_with(['{', '[']) => rest,
        _ => after_fence,
    };
    let fence_end = content.find("```")?;
    Some(content[..fence_end].trim())
}

fn unwrap_payload(value: Value) -> Value {
    match value {
        Value::Object(mut obj) if obj.len() == 1 => {
            let inner_key = WRAPPER_KEYS
                .iter()
                .find(|key| obj.get(**key).is_some_and(Value::is_object));
            match inner_key {
                Some(key) => obj.remove(*key).unwrap_or_default(),
                None => Value::Object(obj),
            }
        }
        other => other,
    }
}
