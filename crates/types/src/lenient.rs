//! Tolerant decoding for response fields.
//!
//! The API is loose about scalar types (amounts and flags sometimes arrive as
//! strings). Identifying fields stay strictly typed; everything decoded
//! through this module degrades instead of failing the whole document.

use serde::{Deserialize, Deserializer, de::DeserializeOwned, de::Error as _};
use serde_json::Value as JsonValue;

/// `deserialize_with` for `Option<T>` fields.
///
/// A value of the wrong type is coerced when it is a scalar in disguise
/// (`"false"`, `"40.00"`, or a number where text is expected) and becomes
/// `None` otherwise.
pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(coerce(value))
}

fn coerce<T: DeserializeOwned>(value: JsonValue) -> Option<T> {
    if value.is_null() {
        return None;
    }
    if let Ok(parsed) = serde_json::from_value(value.clone()) {
        return Some(parsed);
    }
    match value {
        JsonValue::String(text) => serde_json::from_str(text.trim()).ok(),
        scalar @ (JsonValue::Number(_) | JsonValue::Bool(_)) => {
            serde_json::from_value(JsonValue::String(scalar.to_string())).ok()
        }
        _ => None,
    }
}

/// `deserialize_with` for amounts sent either as a JSON number or a numeric string
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("amount out of range: {n}"))),
        JsonValue::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("invalid amount: {text:?}"))),
        other => Err(D::Error::custom(format!("invalid amount: {other}"))),
    }
}
