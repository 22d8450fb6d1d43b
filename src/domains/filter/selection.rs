use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domains::filter::predicate::{FilterSpec, ALL_SENTINEL};
use crate::domains::filter::record::FilterableRecord;

/// Filter state as a list screen holds it: key -> optional value.
///
/// Unset values (`None`, blank, or the `"all"` sentinel) are dropped when the
/// selection is turned into a `FilterSpec`. Keys the record schema does not
/// recognise are a no-op for that key only: they are logged, reported back in
/// `ParsedSelection::ignored`, and every recognised key still applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection {
    entries: BTreeMap<String, Option<String>>,
}

/// Result of turning a selection into predicates
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSelection<F> {
    pub spec: FilterSpec<F>,
    /// Keys that were set but could not become a predicate
    pub ignored: Vec<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.insert(key.to_string(), Some(value.into()));
        self
    }

    pub fn unset(mut self, key: &str) -> Self {
        self.entries.insert(key.to_string(), None);
        self
    }

    pub fn insert(&mut self, key: &str, value: Option<String>) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether a screen value means "no filter"
    pub fn is_unset_value(value: &str) -> bool {
        let value = value.trim();
        value.is_empty() || value == ALL_SENTINEL
    }

    /// Keys currently holding a real value
    pub fn active_keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, value)| value.as_deref().map_or(false, |v| !Self::is_unset_value(v)))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    pub fn into_spec<R: FilterableRecord>(&self) -> ParsedSelection<R::Field> {
        let mut spec = FilterSpec::new();
        let mut ignored = Vec::new();

        for (key, value) in &self.entries {
            let value = match value.as_deref().map(str::trim) {
                Some(value) if !Self::is_unset_value(value) => value,
                _ => continue,
            };

            match R::parse_filter(key, value) {
                Some(predicate) => spec.push(predicate),
                None => {
                    log::warn!(
                        "Ignoring filter '{}'='{}' for {}: not a recognised filter for this list",
                        key,
                        value,
                        R::RESOURCE.as_str()
                    );
                    ignored.push(key.clone());
                }
            }
        }

        ParsedSelection { spec, ignored }
    }
}

/// Parses range values used by numeric screen filters:
/// `"18-35"`, `"60+"`, `"18-"`, `"-35"` and the exact form `"42"`.
/// Bounds must be finite and non-negative; `min <= max`.
pub fn parse_range(value: &str) -> Option<(Option<f64>, Option<f64>)> {
    let value = value.trim();

    let (min, max) = if let Some(min) = value.strip_suffix('+') {
        (parse_bound(min)?, None)
    } else if let Some((min, max)) = value.split_once('-') {
        (parse_bound(min)?, parse_bound(max)?)
    } else {
        let exact = parse_bound(value)?;
        (exact, exact)
    };

    match (min, max) {
        (None, None) => None,
        (Some(min), Some(max)) if min > max => None,
        bounds => Some(bounds),
    }
}

/// `Some(None)` for an empty bound, `None` for garbage
fn parse_bound(bound: &str) -> Option<Option<f64>> {
    let bound = bound.trim();
    if bound.is_empty() {
        return Some(None);
    }
    let n = bound.parse::<f64>().ok()?;
    if n.is_finite() && n >= 0.0 {
        Some(Some(n))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::filter::predicate::{FilterPredicate, SetResolver};
    use crate::domains::voter::{VoterField, VoterRecord};

    #[test]
    fn test_unset_values_are_dropped() {
        let selection = FilterSelection::new()
            .set("gender", "F")
            .set("caste", "all")
            .set("religion", "   ")
            .unset("booth_code");
        let parsed = selection.into_spec::<VoterRecord>();
        assert_eq!(parsed.spec.len(), 1);
        assert!(parsed.ignored.is_empty());
        assert_eq!(selection.active_keys(), vec!["gender"]);
    }

    #[test]
    fn test_unknown_key_is_a_no_op_for_that_key_only() {
        let selection = FilterSelection::new()
            .set("gender", "F")
            .set("shoe_size", "9")
            .set("alliance", "NDA");
        let parsed = selection.into_spec::<VoterRecord>();
        assert_eq!(parsed.ignored, vec!["shoe_size".to_string()]);
        assert_eq!(parsed.spec.len(), 2);
        assert!(parsed.spec.predicates().contains(&FilterPredicate::set_membership(
            &[VoterField::CurrentPreference, VoterField::PriorChoice],
            SetResolver::Alliance,
            "NDA",
        )));
    }

    #[test]
    fn test_unparsable_value_is_ignored() {
        let parsed = FilterSelection::new().set("age", "old").into_spec::<VoterRecord>();
        assert!(parsed.spec.is_empty());
        assert_eq!(parsed.ignored, vec!["age".to_string()]);
    }

    #[test]
    fn test_values_are_trimmed() {
        let parsed = FilterSelection::new().set("gender", " F ").into_spec::<VoterRecord>();
        assert_eq!(parsed.spec.predicates(), &[FilterPredicate::equals(VoterField::Gender, "F")]);
    }

    #[test]
    fn test_parse_range_forms() {
        assert_eq!(parse_range("18-35"), Some((Some(18.0), Some(35.0))));
        assert_eq!(parse_range("60+"), Some((Some(60.0), None)));
        assert_eq!(parse_range("18-"), Some((Some(18.0), None)));
        assert_eq!(parse_range("-35"), Some((None, Some(35.0))));
        assert_eq!(parse_range(" 42 "), Some((Some(42.0), Some(42.0))));
        assert_eq!(parse_range("35-18"), None);
        assert_eq!(parse_range("-"), None);
        assert_eq!(parse_range("+"), None);
        assert_eq!(parse_range("abc"), None);
        assert_eq!(parse_range("inf"), None);
    }

    #[test]
    fn test_deserializes_from_json_object() {
        let selection: FilterSelection =
            serde_json::from_str(r#"{"gender":"F","caste":null,"booth_code":"all"}"#).unwrap();
        assert_eq!(selection.active_keys(), vec!["gender"]);
    }
}
