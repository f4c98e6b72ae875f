//! Typed records for installed releases

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::fields::normalize_keys;

/// One installed release, as reported by the live-state query.
///
/// Field names are normalized from helm's camelCase at construction time;
/// fields this tool does not use (updated timestamp, app version, ...) are
/// ignored. `values_file` is absent until the values materializer writes
/// the release's effective values to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub name: String,
    /// Combined `<chart-name>-<version>` token.
    pub chart: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub revision: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_file: Option<PathBuf>,
}

/// Parse the JSON release listing into records, preserving order.
///
/// Accepts both helm 2 output (an object with a `Releases` array) and
/// helm 3 output (a bare array). Empty output means no releases, not an
/// error.
pub fn parse_release_list(raw: &str) -> Result<Vec<ReleaseRecord>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let normalized = normalize_keys(serde_json::from_str(raw)?);
    let entries = match normalized {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("releases") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(CoreError::MalformedReleaseList {
                    message: "'releases' is not an array".to_string(),
                });
            }
            None => {
                return Err(CoreError::MalformedReleaseList {
                    message: "missing 'releases' key".to_string(),
                });
            }
        },
        _ => {
            return Err(CoreError::MalformedReleaseList {
                message: "expected an object or an array".to_string(),
            });
        }
    };
    entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).map_err(CoreError::from))
        .collect()
}

/// Helm emits the revision as a bare number or a string depending on
/// version; accept both.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for revision, got {other}"
        ))),
    }
}
