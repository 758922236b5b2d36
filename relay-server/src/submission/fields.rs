//! Field extraction helpers for untyped JSON bodies.

use serde_json::{Map, Value};

/// A string field that is non-empty after trimming.
///
/// The value is returned as submitted; trimming only decides presence.
pub fn text(body: &Map<String, Value>, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Optional free-form field: non-blank text, or a non-zero number rendered
/// as text.
pub fn loose_text(body: &Map<String, Value>, key: &str) -> Option<String> {
    match body.get(key) {
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => text(body, key),
    }
}

/// Collect the required fields, or the names of every one that is missing.
pub fn required<const N: usize>(
    body: &Map<String, Value>,
    keys: [&'static str; N],
) -> Result<[String; N], Vec<&'static str>> {
    let values = keys.map(|key| text(body, key));

    let missing: Vec<&'static str> = keys
        .iter()
        .zip(values.iter())
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| *key)
        .collect();

    if !missing.is_empty() {
        return Err(missing);
    }

    Ok(values.map(Option::unwrap_or_default))
}

/// Whether a honeypot value counts as filled in.
///
/// Anything other than absent, `null`, `false`, zero or `""` is filled.
pub fn is_filled(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
