use crate::domains::demographics::{AllianceResolver, CasteCategoryMapper};
use crate::domains::filter::predicate::FilterPredicate;
use crate::domains::filter::record::{FieldKind, FieldValue, FilterableRecord, RecordField};

/// Evaluates a single predicate against a single record.
///
/// Every branch fails closed: a missing field, a value of the wrong kind or
/// an unknown alliance excludes the record. Nothing here panics on bad data.
#[derive(Debug, Clone, Copy)]
pub struct PredicateEvaluator<'a> {
    castes: &'a CasteCategoryMapper,
    alliances: &'a AllianceResolver,
}

impl<'a> PredicateEvaluator<'a> {
    pub fn new(castes: &'a CasteCategoryMapper, alliances: &'a AllianceResolver) -> Self {
        Self { castes, alliances }
    }

    pub fn matches<R: FilterableRecord>(&self, record: &R, predicate: &FilterPredicate<R::Field>) -> bool {
        match predicate {
            FilterPredicate::Equals { field, value } => {
                value_equals(record.value(*field), field.kind(), value)
            }
            FilterPredicate::Range { field, min, max } => record
                .value(*field)
                .as_number()
                .map_or(false, |n| in_range(n, *min, *max)),
            FilterPredicate::Contains { field, needle } => {
                value_contains(record.value(*field), &fold(needle))
            }
            FilterPredicate::DerivedEquals { field, derive, value } => derive
                .derive(record.value(*field), self.castes)
                .map_or(false, |derived| derived.eq_ignore_ascii_case(value)),
            FilterPredicate::SetMembership { fields, resolver, key } => {
                let members = resolver.resolve(key, self.alliances);
                if members.is_empty() {
                    return false;
                }
                fields.iter().any(|field| {
                    record.value(*field).as_text().map_or(false, |text| {
                        members.iter().any(|member| text_equals(text, field.kind(), member))
                    })
                })
            }
        }
    }
}

fn fold(text: &str) -> String {
    text.to_lowercase()
}

fn value_equals(value: FieldValue<'_>, kind: FieldKind, expected: &str) -> bool {
    match value {
        FieldValue::Text(text) => text_equals(text, kind, expected),
        FieldValue::Number(n) => expected
            .trim()
            .parse::<f64>()
            .map_or(false, |expected| n == expected),
        FieldValue::Flag(flag) => parse_flag(expected).map_or(false, |expected| flag == expected),
        FieldValue::Missing => false,
    }
}

/// Categorical text ignores case, everything else is exact.
fn text_equals(text: &str, kind: FieldKind, expected: &str) -> bool {
    match kind {
        FieldKind::Categorical => fold(text) == fold(expected),
        _ => text == expected,
    }
}

fn in_range(n: f64, min: Option<f64>, max: Option<f64>) -> bool {
    if n.is_nan() {
        return false;
    }
    min.map_or(true, |min| n >= min) && max.map_or(true, |max| n <= max)
}

/// `needle` must already be case-folded.
pub(crate) fn value_contains(value: FieldValue<'_>, needle: &str) -> bool {
    match value {
        FieldValue::Text(text) => fold(text).contains(needle),
        FieldValue::Number(n) => render_number(n).contains(needle),
        FieldValue::Flag(_) | FieldValue::Missing => false,
    }
}

fn render_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Accepts "true"/"false", "yes"/"no", "1"/"0", any case.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::filter::predicate::{Derivation, SetResolver};
    use crate::domains::voter::fixtures::sample_voters;
    use crate::domains::voter::{VoterField, VoterRecord};

    fn check(record: &VoterRecord, predicate: FilterPredicate<VoterField>) -> bool {
        let castes = CasteCategoryMapper::default();
        let alliances = AllianceResolver::default();
        PredicateEvaluator::new(&castes, &alliances).matches(record, &predicate)
    }

    fn voter_aged(age: Option<u32>) -> VoterRecord {
        let mut voter = sample_voters()[0].clone();
        voter.age = age;
        voter
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = || FilterPredicate::range(VoterField::Age, Some(18.0), Some(35.0));
        assert!(check(&voter_aged(Some(18)), range()));
        assert!(check(&voter_aged(Some(35)), range()));
        assert!(!check(&voter_aged(Some(17)), range()));
        assert!(!check(&voter_aged(Some(36)), range()));
    }

    #[test]
    fn test_range_open_bounds_and_missing_values() {
        assert!(check(&voter_aged(Some(90)), FilterPredicate::range(VoterField::Age, Some(60.0), None)));
        assert!(check(&voter_aged(Some(20)), FilterPredicate::range(VoterField::Age, None, Some(20.0))));
        assert!(!check(&voter_aged(None), FilterPredicate::range(VoterField::Age, None, None)));
        // Text fields never satisfy a numeric range
        assert!(!check(&voter_aged(Some(20)), FilterPredicate::range(VoterField::Name, Some(0.0), None)));
    }

    #[test]
    fn test_equals_case_rules() {
        let voter = &sample_voters()[1];
        assert!(check(voter, FilterPredicate::equals(VoterField::Gender, "F")));
        // Categorical fields ignore case
        assert!(check(voter, FilterPredicate::equals(VoterField::Gender, "f")));
        // Free text does not
        assert!(check(voter, FilterPredicate::equals(VoterField::Name, "Sunita Devi")));
        assert!(!check(voter, FilterPredicate::equals(VoterField::Name, "sunita devi")));
        assert!(check(voter, FilterPredicate::equals(VoterField::Age, "29")));
        assert!(!check(voter, FilterPredicate::equals(VoterField::Age, "twenty-nine")));
        assert!(check(voter, FilterPredicate::equals(VoterField::Verified, "true")));
        assert!(!check(voter, FilterPredicate::equals(VoterField::Verified, "maybe")));
    }

    #[test]
    fn test_equals_on_missing_field_fails() {
        let voter = &sample_voters()[4];
        assert!(voter.current_preference.is_none());
        assert!(!check(voter, FilterPredicate::equals(VoterField::CurrentPreference, "BJP")));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let voter = &sample_voters()[0];
        assert!(check(voter, FilterPredicate::contains(VoterField::Name, "RAMESH")));
        assert!(check(voter, FilterPredicate::contains(VoterField::Address, "danapur")));
        assert!(check(voter, FilterPredicate::contains(VoterField::Age, "2")));
        assert!(!check(voter, FilterPredicate::contains(VoterField::Name, "Suresh")));
        assert!(!check(voter, FilterPredicate::contains(VoterField::RelativeName, "a")));
    }

    #[test]
    fn test_derived_caste_category() {
        let voters = sample_voters();
        let obc = || FilterPredicate::derived_equals(VoterField::Caste, Derivation::CasteCategory, "OBC");
        assert!(check(&voters[0], obc()));
        assert!(!check(&voters[1], obc()));
        let general = || FilterPredicate::derived_equals(VoterField::Caste, Derivation::CasteCategory, "general");
        assert!(check(&voters[1], general()));

        let mut unknown = voters[0].clone();
        unknown.caste = Some("Unlisted".to_string());
        assert!(check(&unknown, general()));
        unknown.caste = None;
        assert!(!check(&unknown, general()));
    }

    #[test]
    fn test_alliance_matches_either_field() {
        let nda = || {
            FilterPredicate::set_membership(
                &[VoterField::CurrentPreference, VoterField::PriorChoice],
                SetResolver::Alliance,
                "NDA",
            )
        };
        let voters = sample_voters();
        // current preference BJP
        assert!(check(&voters[0], nda()));
        // prior choice BJP only
        assert!(check(&voters[3], nda()));
        // RJD on both
        assert!(!check(&voters[1], nda()));
    }

    #[test]
    fn test_alliance_ignores_party_case() {
        let nda = || {
            FilterPredicate::set_membership(
                &[VoterField::CurrentPreference, VoterField::PriorChoice],
                SetResolver::Alliance,
                "NDA",
            )
        };
        let mut voter = sample_voters()[1].clone();
        voter.current_preference = Some("bjp".to_string());
        assert!(check(&voter, nda()));
        assert!(check(&voter, FilterPredicate::equals(VoterField::CurrentPreference, "BJP")));

        voter.current_preference = Some("Jd(u)".to_string());
        assert!(check(&voter, nda()));

        // Alliance names themselves are matched exactly
        let lowercase_key =
            FilterPredicate::set_membership(&[VoterField::CurrentPreference], SetResolver::Alliance, "nda");
        assert!(!check(&voter, lowercase_key));
    }

    #[test]
    fn test_unknown_alliance_rejects_everything() {
        for voter in sample_voters() {
            let predicate = FilterPredicate::set_membership(
                &[VoterField::CurrentPreference, VoterField::PriorChoice],
                SetResolver::Alliance,
                "Third Front",
            );
            assert!(!check(&voter, predicate));
        }
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" no "), Some(false));
        assert_eq!(parse_flag("y"), None);
    }
}
