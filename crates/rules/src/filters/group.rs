//! AND-groups and OR-sets of filter rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::FilterRule;

/// Ordered rules combined with AND.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "Value")]
pub enum FilterGroup {
    Rules(Vec<FilterRule>),
    /// The configured entry was not a list (e.g. `null`).
    Malformed,
}

impl FilterGroup {
    /// The group that matches everything.
    pub fn empty() -> Self {
        FilterGroup::Rules(Vec::new())
    }

    pub fn rules(&self) -> Option<&[FilterRule]> {
        match self {
            FilterGroup::Rules(rules) => Some(rules),
            FilterGroup::Malformed => None,
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, FilterGroup::Rules(_))
    }
}

impl From<Vec<FilterRule>> for FilterGroup {
    fn from(rules: Vec<FilterRule>) -> Self {
        FilterGroup::Rules(rules)
    }
}

impl From<Value> for FilterGroup {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => {
                FilterGroup::Rules(items.into_iter().map(FilterRule::from).collect())
            }
            _ => FilterGroup::Malformed,
        }
    }
}

/// Ordered groups combined with OR. Empty means "accept everything".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct FilterSet(Vec<FilterGroup>);

impl FilterSet {
    pub fn new(groups: Vec<FilterGroup>) -> Self {
        Self(groups)
    }

    pub fn groups(&self) -> &[FilterGroup] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterGroup> {
        self.0.iter()
    }
}

impl From<Value> for FilterSet {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self(items.into_iter().map(FilterGroup::from).collect()),
            _ => Self::default(),
        }
    }
}

impl FromIterator<FilterGroup> for FilterSet {
    fn from_iter<I: IntoIterator<Item = FilterGroup>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a FilterGroup;
    type IntoIter = std::slice::Iter<'a, FilterGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
