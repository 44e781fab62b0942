//! Request parameter serialization
//!
//! Parameters are an ordered JSON map. On the query string and in form bodies
//! strings go out verbatim, numbers and booleans as their JSON text, and
//! `null` entries are dropped. Mutating requests carry the same map as a JSON
//! body instead.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::{Map, Value};
use url::form_urlencoded;
use yametrika_domain::{MetrikaError, Result};

/// Ordered request parameters
pub type Params = Map<String, Value>;

/// Text form of a parameter value, `None` for `null`
pub fn param_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

/// Encode parameters as `application/x-www-form-urlencoded` query text
pub fn encode_query(params: &Params) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        if let Some(text) = param_text(value) {
            serializer.append_pair(key, &text);
        }
    }
    serializer.finish()
}

/// Append encoded parameters to a URL
///
/// Uses `&` when the URL already carries a query and leaves the URL alone
/// when there is nothing to append.
pub fn append_query(url: &str, params: &Params) -> String {
    let query = encode_query(params);
    if query.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

/// Encode key/value pairs as a form body, preserving their order
pub fn encode_form(pairs: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new()).extend_pairs(pairs).finish()
}

/// Serialize parameters as a JSON request body
pub fn json_body(params: &Params) -> String {
    Value::Object(params.clone()).to_string()
}

/// Convert a serializable model into parameters
///
/// # Errors
/// Returns `MetrikaError::Config` when `value` does not serialize to a JSON
/// object.
pub fn to_params<T: Serialize + ?Sized>(value: &T) -> Result<Params> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(MetrikaError::Config(format!(
            "request parameters must form an object, got {other}"
        ))),
        Err(e) => Err(MetrikaError::Config(format!("failed to serialize parameters: {e}"))),
    }
}

/// Wrap a payload under a single key, e.g. `{"goal": {...}}`
///
/// # Errors
/// Returns `MetrikaError::Config` when `value` cannot be serialized.
pub fn wrapped<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<Params> {
    let inner = serde_json::to_value(value)
        .map_err(|e| MetrikaError::Config(format!("failed to serialize '{key}': {e}")))?;
    let mut params = Params::new();
    params.insert(key.to_string(), inner);
    Ok(params)
}
