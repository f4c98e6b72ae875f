//! Field-name normalization for externally-cased JSON
//!
//! Helm's release listing uses camelCase (helm 2 went as far as
//! `AppVersion`); internally everything is snake_case. The conversion
//! inserts an underscore before every uppercase letter that is not at the
//! start of the key, then lower-cases the result.

use serde_json::Value;

/// Convert a camelCase key to snake_case.
///
/// Handles arbitrary-length camel runs: `AppVersion` -> `app_version`,
/// `chartVersion` -> `chart_version`. Keys without uppercase letters pass
/// through unchanged.
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Recursively rewrite every object key in a JSON value to snake_case.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (camel_to_snake(&key), normalize_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}
