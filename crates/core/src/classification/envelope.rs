//! Service error envelope classification

use serde_json::{Map, Value};
use tracing::debug;
use yametrika_domain::constants::INVALID_CLIENT;
use yametrika_domain::{ApiGeneration, ApiObject, MetrikaError, Result, ServiceError};

/// Inspect a decoded body for an error envelope
///
/// Returns `None` when the body carries neither `errors` nor `error`, i.e.
/// it is a success payload.
pub fn classify_envelope(generation: ApiGeneration, body: &Map<String, Value>) -> Option<MetrikaError> {
    if let Some(errors) = body.get("errors") {
        let entries = errors.as_array().map(Vec::as_slice).unwrap_or_default();
        let err = match entries {
            [entry] => single_entry(generation, entry, body),
            _ => ServiceError::new(joined_texts(entries), None),
        };
        return Some(MetrikaError::Service(err));
    }

    let error = body.get("error")?;
    let error = text_of(error);
    if error == INVALID_CLIENT {
        let detail = body
            .get("error_description")
            .and_then(Value::as_str)
            .unwrap_or(INVALID_CLIENT);
        return Some(MetrikaError::Unauthorized(detail.to_string()));
    }
    Some(MetrikaError::Service(ServiceError::new(error, body.get("code").and_then(code_of))))
}

/// Decode a response body and apply [`classify_envelope`]
///
/// An empty body decodes to an empty object.
///
/// # Errors
/// - `MetrikaError::Decode` when the body is not a JSON object
/// - the classified envelope error when the body carries one
pub fn decode_envelope(generation: ApiGeneration, body: &str) -> Result<ApiObject> {
    if body.trim().is_empty() {
        return Ok(ApiObject::default());
    }

    let value: Value = serde_json::from_str(body).map_err(|e| {
        debug!(error = %e, body_len = body.len(), "response body is not JSON");
        MetrikaError::Decode(format!("invalid JSON in response body: {e}"))
    })?;

    let Value::Object(map) = value else {
        return Err(MetrikaError::Decode(format!(
            "expected a JSON object, got {}",
            kind_of(&value)
        )));
    };

    match classify_envelope(generation, &map) {
        Some(err) => Err(err),
        None => Ok(ApiObject::new(map)),
    }
}

fn single_entry(generation: ApiGeneration, entry: &Value, body: &Map<String, Value>) -> ServiceError {
    match generation {
        ApiGeneration::Stable => ServiceError::new(
            entry.get("text").map(text_of).unwrap_or_default(),
            entry.get("code").and_then(code_of),
        ),
        // Beta entries carry no numeric code; it lives on the envelope. The
        // human-readable `message` wins over the `error_type` slug.
        ApiGeneration::Beta => {
            let error_type = entry.get("error_type").map(text_of);
            let message = entry
                .get("message")
                .map(text_of)
                .filter(|m| !m.is_empty())
                .or_else(|| error_type.clone())
                .unwrap_or_default();
            let err = ServiceError::new(message, body.get("code").and_then(code_of));
            match error_type {
                Some(kind) => err.with_error_type(kind),
                None => err,
            }
        }
    }
}

fn joined_texts(entries: &[Value]) -> String {
    entries
        .iter()
        .map(|entry| entry.get("text").map(text_of).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// Codes arrive as numbers, occasionally as numeric strings
fn code_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
