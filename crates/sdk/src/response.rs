//! Classification of raw response bodies.
//!
//! The API signals failure in-band: an error comes back as an object with a
//! top-level `code` and/or `message` key instead of the resource. A body that
//! is not a JSON object or array at all is treated as undecodable.

use paymaya_types::ApiErrorPayload;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::error::{PaymentsError, Result};

/// Parse `raw` and reject remote error documents
pub fn check(raw: &str) -> Result<JsonValue> {
    let value: JsonValue = serde_json::from_str(raw)
        .map_err(|e| PaymentsError::Decode(format!("response is not JSON: {e}")))?;

    let is_error_document = value
        .as_object()
        .is_some_and(|map| map.contains_key("code") || map.contains_key("message"));
    if is_error_document {
        let err = PaymentsError::from(error_payload(&value));
        warn!(error = %err, "API returned an error document");
        return Err(err);
    }

    if value.is_object() || value.is_array() {
        Ok(value)
    } else {
        Err(PaymentsError::Decode(
            "response is not a JSON object or array".to_string(),
        ))
    }
}

// Lenient: a `message` that is not a string is rendered as JSON text.
fn error_payload(value: &JsonValue) -> ApiErrorPayload {
    serde_json::from_value(value.clone()).unwrap_or_else(|_| ApiErrorPayload {
        code: value.get("code").cloned(),
        message: value.get("message").map(|m| match m {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        }),
        parameters: None,
    })
}

/// Check `raw` and decode it into a typed resource
pub fn decode<R: DeserializeOwned>(raw: &str) -> Result<R> {
    let value = check(raw)?;
    serde_json::from_value(value).map_err(|e| PaymentsError::Decode(e.to_string()))
}

/// Check `raw` and decode a JSON array of resources
pub fn decode_list<R: DeserializeOwned>(raw: &str) -> Result<Vec<R>> {
    match check(raw)? {
        JsonValue::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(|e| PaymentsError::Decode(e.to_string())))
            .collect(),
        _ => Err(PaymentsError::Decode("expected a JSON array".to_string())),
    }
}
