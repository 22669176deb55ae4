//! Tolerant conversions from loosely-typed JSON input.
//!
//! Designer input arrives from form controls, so numbers may be strings and
//! cleared inputs may be `null` or `""`. Callers apply their own default when
//! a conversion yields `None`.

use serde_json::Value;

/// Finite number from a JSON number or a numeric string.
pub fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|v| v.is_finite())
}

/// Boolean from a JSON bool, `"true"`/`"false"`/`"1"`/`"0"`, or a number (non-zero is true).
pub fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Text from a JSON string; numbers and booleans are stringified.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
