use serde_json::{Map, Value};

pub const REDACTED: &str = "[REDACTED]";

const SENSITIVE_KEYS: &[&str] = &[
    "password",
    "secret",
    "token",
    "api_key",
    "apikey",
    "credential",
    "private_key",
    "authorization",
    "passwd",
];

/// Matched only as a whole `_`-separated segment, so `author` stays visible.
const SENSITIVE_SEGMENTS: &[&str] = &["auth", "pwd"];

fn is_sensitive(key: &str) -> bool {
    let key = key.to_lowercase().replace('-', "_");
    SENSITIVE_KEYS.iter().any(|pattern| key.contains(pattern))
        || key
            .split('_')
            .any(|segment| SENSITIVE_SEGMENTS.contains(&segment))
}

/// Copy of `arguments` with values under sensitive keys replaced by `REDACTED`.
pub fn sanitize_arguments(arguments: &Value) -> Value {
    match arguments {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let value = if is_sensitive(key) {
                        Value::String(REDACTED.to_string())
                    } else {
                        sanitize_arguments(value)
                    };
                    (key.clone(), value)
                })
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(sanitize_arguments).collect()),
        other => other.clone(),
    }
}
