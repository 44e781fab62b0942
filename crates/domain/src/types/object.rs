//! Decoded response objects

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{MetrikaError, Result};
use crate::types::pagination::Cursor;

/// API generation that issued a request
///
/// The generation selects the host, the path suffix and the shape of
/// single-entry error envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiGeneration {
    /// `api-metrika` host, `.json` paths, `text`/`code` error entries
    Stable,
    /// `beta.api-metrika` host, bare paths, `error_type`/`message` entries
    Beta,
}

/// Ordered key/value view over a decoded JSON object
///
/// Report shapes are open-ended, so fields are reached through accessors
/// instead of a fixed struct. Use [`ApiObject::into_typed`] when the caller
/// knows the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiObject(Map<String, Value>);

impl ApiObject {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    pub fn get_array(&self, key: &str) -> Option<&Vec<Value>> {
        self.0.get(key).and_then(Value::as_array)
    }

    pub fn get_object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.0.get(key).and_then(Value::as_object)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Keys in the order the service sent them
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `links` mapping of a list response
    pub fn links(&self) -> Option<&Map<String, Value>> {
        self.get_object("links")
    }

    /// Continuation reference from `links.next`, if the page has one
    pub fn next_cursor(&self) -> Option<Cursor> {
        self.links()
            .and_then(|links| links.get("next"))
            .and_then(Value::as_str)
            .map(Cursor::new)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Remove a field and return its value
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Deserialize the object into a caller-defined type
    ///
    /// # Errors
    /// Returns `MetrikaError::Decode` when the object does not match `T`.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(Value::Object(self.0))
            .map_err(|e| MetrikaError::Decode(format!("unexpected response shape: {e}")))
    }
}

impl From<Map<String, Value>> for ApiObject {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
