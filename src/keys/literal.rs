use serde_json::Value;

/// Interprets a default-value argument.
///
/// JSON literals (objects, arrays, strings, numbers, `true`, `false`,
/// `null`) parse as such; `None`, `True`, `False` and single-quoted text
/// are accepted as well. Anything else is kept verbatim as a string.
pub fn parse_literal(text: &str) -> Value {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return value;
    }
    match trimmed {
        "None" => Value::Null,
        "True" => Value::Bool(true),
        "False" => Value::Bool(false),
        quoted if quoted.len() >= 2 && quoted.starts_with('\'') && quoted.ends_with('\'') => {
            Value::String(quoted[1..quoted.len() - 1].to_string())
        }
        _ => Value::String(text.to_string()),
    }
}
