//! Request models for the management endpoints
//!
//! Each model serializes to the object the service expects inside its
//! wrapper key (`goal`, `filter`, `operation`, `grant`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Goal of a counter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub goal_type: String,
    pub depth: i64,
    /// Empty string when the goal has no flag
    pub flag: String,
    pub conditions: Vec<Value>,
}

impl GoalSpec {
    pub fn new(name: impl Into<String>, goal_type: impl Into<String>, depth: i64) -> Self {
        Self { name: name.into(), goal_type: goal_type.into(), depth, ..Self::default() }
    }

    #[must_use]
    pub fn with_conditions(mut self, conditions: Vec<Value>) -> Self {
        self.conditions = conditions;
        self
    }

    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = flag.into();
        self
    }
}

/// Traffic filter of a counter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub action: String,
    pub attr: String,
    #[serde(rename = "type")]
    pub filter_type: String,
    pub value: String,
    pub status: String,
}

/// URL rewrite operation of a counter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSpec {
    pub action: String,
    pub attr: String,
    pub value: String,
    pub status: String,
}

/// Access grant on a counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantSpec {
    pub user_login: String,
    pub perm: String,
}

impl GrantSpec {
    pub fn new(user_login: impl Into<String>, perm: impl Into<String>) -> Self {
        Self { user_login: user_login.into(), perm: perm.into() }
    }
}

/// Filters of the counter list
///
/// All four fields go on the wire, empty ones included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterListQuery {
    #[serde(rename = "type")]
    pub counter_type: String,
    pub permission: String,
    pub ulogin: String,
    pub field: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_goal_wire_shape() {
        let goal = GoalSpec::new("Signup", "url", 0)
            .with_conditions(vec![json!({"type": "contain", "url": "signup"})]);
        assert_eq!(
            serde_json::to_value(&goal).unwrap(),
            json!({
                "name": "Signup",
                "type": "url",
                "depth": 0,
                "flag": "",
                "conditions": [{"type": "contain", "url": "signup"}]
            })
        );
    }

    #[test]
    fn test_counter_list_query_renames_type() {
        let query = CounterListQuery { counter_type: "simple".into(), ..Default::default() };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"type": "simple", "permission": "", "ulogin": "", "field": ""})
        );
    }
}
