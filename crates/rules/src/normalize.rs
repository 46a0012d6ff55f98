//! Load-time cleanup of configured filter sets.

use crate::filters::{FilterGroup, FilterRule, FilterSet};

/// Collapse every group made only of default-operator rules into the empty
/// (match-everything) group.
///
/// Groups with at least one non-default operator are kept as configured,
/// malformed rules included. Non-list groups are kept too, so trace
/// positions (`filter group #n`) stay stable. Absent or empty input yields
/// the empty set. Idempotent.
pub fn normalize(filters: Option<&FilterSet>) -> FilterSet {
    let Some(filters) = filters.filter(|f| !f.is_empty()) else {
        return FilterSet::default();
    };

    filters
        .iter()
        .map(|group| match group {
            FilterGroup::Rules(rules) if rules.iter().all(FilterRule::is_trivial) => {
                FilterGroup::empty()
            }
            other => other.clone(),
        })
        .collect()
}
