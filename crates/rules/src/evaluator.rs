//! OR-of-ANDs filter evaluation with a step-by-step trace.
//!
//! A `FilterSet` matches when any of its groups matches; a group matches
//! when all of its rules do. Both levels short-circuit, and every comparison
//! performed writes one line to the `VerboseLog` sink. The line formats are
//! consumed verbatim downstream:
//!
//! ```text
//!  > no filters provided → matching by default
//!  > filter group #2
//!  + looking for "movie" at "Metadata.librarySectionType", found "movie"
//!  - looking for "Safari" at "Player.title", found "Apple TV"
//! ```
//!
//! Malformed input never errors:
//! - a non-list group is skipped silently (its slot still counts for `#n`)
//! - a rule missing `path` or `value` fails its group without a trace line

use plexhook_core::{comparable, js_string, lookup};
use serde_json::Value;

use crate::filters::{FilterGroup, FilterRule, FilterSet, Operator};
use crate::log::VerboseLog;

pub const NO_FILTERS_MESSAGE: &str = " > no filters provided → matching by default";

/// Evaluates one sensor's filters against one payload.
pub struct FilterEvaluator<'a, L: VerboseLog + ?Sized> {
    log: &'a L,
    payload: &'a Value,
    groups: &'a [FilterGroup],
}

impl<'a, L: VerboseLog + ?Sized> FilterEvaluator<'a, L> {
    /// Absent filters behave like an empty set.
    pub fn new(log: &'a L, payload: &'a Value, filters: Option<&'a FilterSet>) -> Self {
        Self {
            log,
            payload,
            groups: filters.map(FilterSet::groups).unwrap_or(&[]),
        }
    }

    /// True when any group matches, or when there are no groups at all.
    pub fn matches(&self) -> bool {
        if self.groups.is_empty() {
            self.log.verbose(NO_FILTERS_MESSAGE);
            return true;
        }

        for (index, group) in self.groups.iter().enumerate() {
            if !group.is_sequence() {
                continue;
            }

            self.log.verbose(&format!(" > filter group #{}", index + 1));

            if self.match_group(group) {
                return true;
            }
        }

        false
    }

    /// True when every rule matches. Stops at the first mismatch or
    /// malformed rule.
    pub fn match_group(&self, group: &FilterGroup) -> bool {
        let Some(rules) = group.rules() else {
            return false;
        };

        for rule in rules {
            if !self.match_rule(rule) {
                return false;
            }
        }

        true
    }

    /// Compare the string form of the value at `path` with `expected`.
    /// A missing operator means equality; so does any unrecognized one.
    pub fn match_pair(&self, path: &str, expected: &Value, operator: Option<&Operator>) -> bool {
        let expected = js_string(expected);
        let actual = comparable(lookup(self.payload, path).as_deref());

        let matched = match operator {
            Some(Operator::NotEqual) => expected != actual,
            _ => expected == actual,
        };

        self.log.verbose(&format!(
            " {} looking for \"{}\" at \"{}\", found \"{}\"",
            if matched { '+' } else { '-' },
            expected,
            path,
            actual
        ));

        matched
    }

    fn match_rule(&self, rule: &FilterRule) -> bool {
        match (&rule.path, &rule.value) {
            (Some(path), Some(value)) => self.match_pair(path, value, rule.operator.as_ref()),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::RecordingLog;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "event": "media.play",
            "Metadata": { "librarySectionType": "movie", "year": 1995, "index": 0 },
            "Player": { "title": "Apple TV", "local": true }
        })
    }

    fn set(raw: Value) -> FilterSet {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn pair_equality_match() {
        let log = RecordingLog::new();
        let doc = payload();
        let eval = FilterEvaluator::new(&log, &doc, None);

        assert!(eval.match_pair("Player.title", &json!("Apple TV"), None));
        assert_eq!(
            log.lines(),
            vec![" + looking for \"Apple TV\" at \"Player.title\", found \"Apple TV\""]
        );
    }

    #[test]
    fn pair_equality_mismatch() {
        let log = RecordingLog::new();
        let doc = payload();
        let eval = FilterEvaluator::new(&log, &doc, None);

        assert!(!eval.match_pair("Player.title", &json!("Safari"), Some(&Operator::Equal)));
        assert_eq!(
            log.lines(),
            vec![" - looking for \"Safari\" at \"Player.title\", found \"Apple TV\""]
        );
    }

    #[test]
    fn pair_inequality_is_negation() {
        let log = RecordingLog::new();
        let doc = payload();
        let eval = FilterEvaluator::new(&log, &doc, None);

        for expected in [json!("Apple TV"), json!("Safari"), json!(""), json!(1995)] {
            for path in ["Player.title", "Metadata.year", "missing"] {
                let eq = eval.match_pair(path, &expected, None);
                let ne = eval.match_pair(path, &expected, Some(&Operator::NotEqual));
                assert_ne!(eq, ne, "{path} vs {expected}");
            }
        }
    }

    #[test]
    fn pair_paths_follow_array_semantics() {
        let log = RecordingLog::new();
        let doc = json!({ "Genre": ["Drama", "Comedy"] });
        let eval = FilterEvaluator::new(&log, &doc, None);

        assert!(!eval.match_pair("Genre.01", &json!("Comedy"), None));
        assert!(eval.match_pair("Genre[+1]", &json!("Comedy"), Some(&Operator::NotEqual)));
        assert!(eval.match_pair("Genre.length", &json!(2), None));
        assert_eq!(
            log.lines(),
            vec![
                " - looking for \"Comedy\" at \"Genre.01\", found \"\"",
                " + looking for \"Comedy\" at \"Genre[+1]\", found \"\"",
                " + looking for \"2\" at \"Genre.length\", found \"2\"",
            ]
        );
    }

    #[test]
    fn pair_stringifies_both_sides() {
        let log = RecordingLog::new();
        let doc = payload();
        let eval = FilterEvaluator::new(&log, &doc, None);

        assert!(eval.match_pair("Metadata.year", &json!("1995"), None));
        assert!(eval.match_pair("Metadata.year", &json!(1995), None));
        assert!(eval.match_pair("Metadata.index", &json!(0), None));
        assert!(eval.match_pair("Player.local", &json!("true"), None));
        assert_eq!(
            log.lines()[0],
            " + looking for \"1995\" at \"Metadata.year\", found \"1995\""
        );
    }

    #[test]
    fn pair_absent_path_is_empty_string() {
        let log = RecordingLog::new();
        let doc = payload();
        let eval = FilterEvaluator::new(&log, &doc, None);

        assert!(eval.match_pair("Account.title", &json!(""), None));
        assert!(!eval.match_pair("Account.title", &json!("Jane"), None));
        assert!(eval.match_pair("Account.title", &json!("Jane"), Some(&Operator::NotEqual)));
        assert_eq!(
            log.lines()[1],
            " - looking for \"Jane\" at \"Account.title\", found \"\""
        );
    }

    #[test]
    fn pair_unknown_operator_is_equality() {
        let log = RecordingLog::new();
        let doc = payload();
        let eval = FilterEvaluator::new(&log, &doc, None);
        let op = Operator::Other("==".to_string());

        assert!(eval.match_pair("Player.title", &json!("Apple TV"), Some(&op)));
        assert!(!eval.match_pair("Player.title", &json!("Roku"), Some(&op)));
    }

    #[test]
    fn empty_group_matches_silently() {
        let log = RecordingLog::new();
        let doc = payload();
        let eval = FilterEvaluator::new(&log, &doc, None);

        assert!(eval.match_group(&FilterGroup::empty()));
        assert!(log.is_empty());
    }

    #[test]
    fn malformed_group_never_matches() {
        let log = RecordingLog::new();
        let doc = payload();
        let eval = FilterEvaluator::new(&log, &doc, None);

        assert!(!eval.match_group(&FilterGroup::Malformed));
        assert!(log.is_empty());
    }

    #[test]
    fn group_and_short_circuit() {
        let log = RecordingLog::new();
        let doc = payload();
        let eval = FilterEvaluator::new(&log, &doc, None);
        let group = FilterGroup::Rules(vec![
            FilterRule::new("Player.title", "Roku"),
            FilterRule::new("Metadata.librarySectionType", "movie"),
        ]);

        assert!(!eval.match_group(&group));
        assert_eq!(
            log.lines(),
            vec![" - looking for \"Roku\" at \"Player.title\", found \"Apple TV\""]
        );
    }

    #[test]
    fn group_malformed_rule_invalidates() {
        let log = RecordingLog::new();
        let doc = json!({ "a": "x" });
        let eval = FilterEvaluator::new(&log, &doc, None);
        let group = FilterGroup::from(json!([{ "path": "a", "value": "x" }, { "value": "y" }]));

        assert!(!eval.match_group(&group));
        assert_eq!(log.lines(), vec![" + looking for \"x\" at \"a\", found \"x\""]);
    }

    #[test]
    fn group_malformed_rule_first_stops_before_valid_rules() {
        let log = RecordingLog::new();
        let doc = json!({ "a": "x" });
        let eval = FilterEvaluator::new(&log, &doc, None);
        let group = FilterGroup::from(json!([null, { "path": "a", "value": "x" }]));

        assert!(!eval.match_group(&group));
        assert!(log.is_empty());
    }

    #[test]
    fn group_null_value_is_compared() {
        let log = RecordingLog::new();
        let doc = json!({ "a": "null" });
        let eval = FilterEvaluator::new(&log, &doc, None);
        let group = FilterGroup::from(json!([{ "path": "a", "value": null }]));

        assert!(eval.match_group(&group));
    }

    #[test]
    fn no_filters_matches_by_default() {
        let log = RecordingLog::new();
        let doc = payload();

        assert!(FilterEvaluator::new(&log, &doc, None).matches());
        assert!(FilterEvaluator::new(&log, &doc, Some(&FilterSet::default())).matches());
        assert_eq!(log.lines(), vec![NO_FILTERS_MESSAGE, NO_FILTERS_MESSAGE]);
    }

    #[test]
    fn set_or_short_circuit() {
        let log = RecordingLog::new();
        let doc = payload();
        let filters = set(json!([
            [{ "path": "Player.title", "value": "Apple TV" }],
            [{ "path": "Player.title", "value": "Roku" }]
        ]));

        assert!(FilterEvaluator::new(&log, &doc, Some(&filters)).matches());
        assert_eq!(
            log.lines(),
            vec![
                " > filter group #1",
                " + looking for \"Apple TV\" at \"Player.title\", found \"Apple TV\"",
            ]
        );
    }

    #[test]
    fn set_skips_malformed_groups_but_counts_them() {
        let log = RecordingLog::new();
        let doc = payload();
        let filters = set(json!([null, "junk", [{ "path": "Player.title", "value": "Apple TV" }]]));

        assert!(FilterEvaluator::new(&log, &doc, Some(&filters)).matches());
        assert_eq!(log.lines()[0], " > filter group #3");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn set_of_only_malformed_groups_fails_silently() {
        let log = RecordingLog::new();
        let doc = payload();
        let filters = set(json!([null, 5]));

        assert!(!FilterEvaluator::new(&log, &doc, Some(&filters)).matches());
        assert!(log.is_empty());
    }

    #[test]
    fn set_with_empty_group_matches() {
        let log = RecordingLog::new();
        let doc = payload();
        let filters = set(json!([[{ "path": "Player.title", "value": "Roku" }], []]));

        assert!(FilterEvaluator::new(&log, &doc, Some(&filters)).matches());
        assert_eq!(
            log.lines(),
            vec![
                " > filter group #1",
                " - looking for \"Roku\" at \"Player.title\", found \"Apple TV\"",
                " > filter group #2",
            ]
        );
    }

    #[test]
    fn broken_group_does_not_affect_others() {
        let log = RecordingLog::new();
        let doc = payload();
        let filters = set(json!([
            [{ "path": "Player.title" }],
            [{ "path": "Metadata.librarySectionType", "value": "movie" }]
        ]));

        assert!(FilterEvaluator::new(&log, &doc, Some(&filters)).matches());
        assert_eq!(log.lines()[0], " > filter group #1");
        assert_eq!(log.lines()[1], " > filter group #2");
    }

    #[test]
    fn evaluation_is_repeatable() {
        let log = RecordingLog::new();
        let doc = payload();
        let filters = set(json!([[{ "path": "Player.title", "value": "Safari", "operator": "!==" }]]));
        let eval = FilterEvaluator::new(&log, &doc, Some(&filters));

        assert!(eval.matches());
        let first = log.lines();
        log.clear();
        assert!(eval.matches());
        assert_eq!(log.lines(), first);
        assert_eq!(doc, payload());
    }
}
