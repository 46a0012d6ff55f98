//! Single path/operator/value comparison directives.

use std::fmt;

use plexhook_core::js_string;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Comparison operator of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    /// `===`
    Equal,
    /// `!==`
    NotEqual,
    /// Anything else; compared as equality but kept verbatim.
    Other(String),
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Equal => "===",
            Operator::NotEqual => "!==",
            Operator::Other(raw) => raw,
        }
    }

    /// Parse a configured operator. Empty strings count as absent.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "" => None,
            "===" => Some(Operator::Equal),
            "!==" => Some(Operator::NotEqual),
            other => Some(Operator::Other(other.to_string())),
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) => Self::parse(s),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(Operator::Other(js_string(other))),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single comparison directive.
///
/// `path` and `value` are required for the rule to be evaluated; a rule
/// lacking either invalidates its whole group. `value: Some(Value::Null)`
/// is a present value and compares as `"null"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct FilterRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
}

impl FilterRule {
    /// Equality rule (no explicit operator).
    pub fn new(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            path: Some(path.into()),
            value: Some(value.into()),
            operator: None,
        }
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Both `path` and `value` are present.
    pub fn is_well_formed(&self) -> bool {
        self.path.is_some() && self.value.is_some()
    }

    /// Uses the default operator, explicitly or by omission.
    pub fn is_trivial(&self) -> bool {
        matches!(self.operator, None | Some(Operator::Equal))
    }
}

impl From<Value> for FilterRule {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return FilterRule::default();
        };

        let path = match map.remove("path") {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        };

        Self {
            path,
            value: map.remove("value"),
            operator: map.get("operator").and_then(Operator::from_json),
        }
    }
}
