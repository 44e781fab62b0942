//! Cursor pagination types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::errors::{MetrikaError, Result};
use crate::types::object::ApiObject;

/// Opaque continuation reference taken from `links.next`
///
/// The service sends either a fully qualified URL or a reference relative to
/// the API host. Absence of a cursor ends pagination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Query part of the reference: the text after the first `?`, or the
    /// whole reference when it has none
    pub fn query_fragment(&self) -> &str {
        match self.0.find('?') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Absolute URL of the next page
    ///
    /// Absolute references are returned unchanged; relative ones are joined
    /// to `base`.
    ///
    /// # Errors
    /// Returns `MetrikaError::Config` when `base` is not a valid URL or the
    /// reference cannot be joined to it.
    pub fn resolve(&self, base: &str) -> Result<String> {
        if Url::parse(&self.0).is_ok() {
            return Ok(self.0.clone());
        }
        let base = Url::parse(base)
            .map_err(|e| MetrikaError::Config(format!("invalid base url '{base}': {e}")))?;
        base.join(&self.0)
            .map(String::from)
            .map_err(|e| MetrikaError::Config(format!("invalid cursor '{}': {e}", self.0)))
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cursor {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One fetched page of a list endpoint, or the aggregate of several
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    /// `rows` reported by the service, else the number of items
    pub count: u64,
    /// Items of the page
    pub items: Vec<Value>,
    /// Cursor of the following page
    pub next: Option<Cursor>,
}

impl ResultPage {
    /// Split a decoded list response into a page
    ///
    /// A missing or non-array `items_key` yields an empty page.
    pub fn from_object(obj: &ApiObject, items_key: &str) -> Self {
        let items = obj.get_array(items_key).cloned().unwrap_or_default();
        let count = obj
            .get("rows")
            .and_then(Value::as_u64)
            .unwrap_or(items.len() as u64);
        Self { count, items, next: obj.next_cursor() }
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Append the items of a following page and adopt its cursor
    pub fn extend(&mut self, page: ResultPage) {
        self.items.extend(page.items);
        self.count = self.items.len() as u64;
        self.next = page.next;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_query_fragment() {
        assert_eq!(
            Cursor::new("https://api/stat/geo.json?id=1&offset=100").query_fragment(),
            "id=1&offset=100"
        );
        assert_eq!(Cursor::new("id=1&offset=100").query_fragment(), "id=1&offset=100");
        assert_eq!(Cursor::new("a?b?c").query_fragment(), "b?c");
    }

    #[test]
    fn test_resolve() {
        let absolute = Cursor::new("https://api-metrika.yandex.ru/counters.json?offset=2");
        assert_eq!(absolute.resolve("http://other/").unwrap(), absolute.as_str());

        let relative = Cursor::new("counters.json?offset=2");
        assert_eq!(
            relative.resolve("http://127.0.0.1:9000/").unwrap(),
            "http://127.0.0.1:9000/counters.json?offset=2"
        );

        assert!(relative.resolve("not a url").is_err());
    }

    #[test]
    fn test_page_from_object() {
        let obj: ApiObject = serde_json::from_value(json!({
            "rows": 10,
            "counters": [{"id": 1}, {"id": 2}],
            "links": {"next": "P2"}
        }))
        .unwrap();

        let page = ResultPage::from_object(&obj, "counters");
        assert_eq!(page.count, 10);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.next, Some(Cursor::new("P2")));

        let empty = ResultPage::from_object(&obj, "goals");
        assert_eq!(empty.count, 10);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_extend() {
        let mut first = ResultPage { count: 2, items: vec![json!("a"), json!("b")], next: Some("P2".into()) };
        first.extend(ResultPage { count: 1, items: vec![json!("c")], next: None });

        assert_eq!(first.items, vec![json!("a"), json!("b"), json!("c")]);
        assert_eq!(first.count, 3);
        assert!(!first.has_next());
    }
}
