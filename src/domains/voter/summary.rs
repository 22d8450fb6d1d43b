use std::collections::BTreeMap;

use serde::Serialize;

use crate::domains::demographics::{AllianceResolver, CasteCategoryMapper};
use crate::domains::voter::VoterRecord;

pub const UNALIGNED: &str = "Unaligned";
pub const UNDECIDED: &str = "Undecided";
const UNKNOWN: &str = "Unknown";

/// Dashboard tallies over a set of voters.
///
/// Bucket keys are canonical names: upper-cased gender, the category's string
/// form and the configured alliance name. Record text is never used as a key,
/// so "bjp" and "BJP" both count under the alliance that lists BJP.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VoterSummary {
    pub total: usize,
    pub by_gender: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
    /// Alliance of the current preference
    pub by_alliance: BTreeMap<String, usize>,
    /// Mean over voters with a known age
    pub average_age: Option<f64>,
}

impl VoterSummary {
    pub fn from_records<'r, I>(records: I, castes: &CasteCategoryMapper, alliances: &AllianceResolver) -> Self
    where
        I: IntoIterator<Item = &'r VoterRecord>,
    {
        let mut summary = VoterSummary::default();
        let mut age_sum = 0u64;
        let mut aged = 0u64;

        for voter in records {
            summary.total += 1;

            let gender = voter
                .gender
                .as_deref()
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_uppercase)
                .unwrap_or_else(|| UNKNOWN.to_string());
            *summary.by_gender.entry(gender).or_default() += 1;

            // Missing caste stays out of the General bucket
            let category = voter
                .caste
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .map_or(UNKNOWN, |label| castes.category_of(label).as_str());
            *summary.by_category.entry(category.to_string()).or_default() += 1;

            let alliance = match voter.current_preference.as_deref().filter(|p| !p.trim().is_empty()) {
                Some(party) => alliances.alliance_of(party).unwrap_or(UNALIGNED),
                None => UNDECIDED,
            };
            *summary.by_alliance.entry(alliance.to_string()).or_default() += 1;

            if let Some(age) = voter.age {
                age_sum += u64::from(age);
                aged += 1;
            }
        }

        if aged > 0 {
            summary.average_age = Some(age_sum as f64 / aged as f64);
        }
        summary
    }
}
