//! Field deserializers for exporter data that is loosely typed.
//!
//! Each one accepts `null` as the field's default and never rejects a value
//! for having the wrong JSON type, so one odd field cannot fail a whole
//! submission. Validators decide what the value is worth.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings pass through, `null` becomes empty, anything else keeps its raw
/// JSON text (`1696150000`, `true`).
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(Value::deserialize(deserializer)?).unwrap_or_default())
}

pub(crate) fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(Value::deserialize(deserializer)?))
}

/// Negative, fractional and numeric-string counts are read as best they
/// can be; everything else counts as zero.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|n| n.is_finite() && *n > 0.0).map(|n| n as u64))
            .unwrap_or(0),
        Value::String(raw) => raw.trim().parse().unwrap_or(0),
        _ => 0,
    };
    Ok(value)
}

/// `null` or a non-array becomes empty; items that do not fit `T` are dropped.
pub(crate) fn sequence<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok(items)
}

/// `null` or a value that does not fit `T` becomes `T::default()`.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(raw) => Some(raw),
        other => Some(other.to_string()),
    }
}
