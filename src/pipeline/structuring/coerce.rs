// String coercion applied to every field read out of an LLM payload.
// Models regularly return nested objects or numbers where a sentence was
// asked for; those are flattened to text instead of rejected.

use serde::Serialize;
use serde_json::{Map, Value};

use super::StructuringError;

/// Coerce any JSON value into display text.
///
/// Null becomes `""`, strings pass through, numbers and booleans use their
/// usual rendering, and objects/arrays fall back to their JSON text.
pub fn ensure_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Coerce an optional value; an absent key behaves like null.
pub fn ensure_string_opt(value: Option<&Value>) -> String {
    value.map(ensure_string).unwrap_or_default()
}

/// Read `key` from a JSON object and coerce it.
pub fn field_string(obj: &Map<String, Value>, key: &str) -> String {
    ensure_string_opt(obj.get(key))
}

/// Coerce an arbitrary serializable value using the same rules as
/// [`ensure_string`]. Fails only when the value cannot be represented as JSON.
pub fn ensure_string_of<T: Serialize + ?Sized>(value: &T) -> Result<String, StructuringError> {
    let json = serde_json::to_value(value).map_err(StructuringError::Serialization)?;
    Ok(ensure_string(&json))
}
