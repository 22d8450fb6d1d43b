use serde::{Deserialize, Serialize};

use crate::domains::filter::{
    parse_range, FieldKind, FieldValue, FilterPredicate, FilterableRecord, RecordField,
};
use crate::domains::permission::Resource;

/// Polling booth, the smallest unit voters are grouped by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoothRecord {
    pub booth_code: String,
    pub name: String,
    pub constituency: Option<String>,
    pub block: Option<String>,
    pub panchayat: Option<String>,
    pub total_voters: Option<u32>,
    /// "normal", "sensitive" or "hyper_sensitive"
    pub sensitivity: Option<String>,
    pub coordinator_name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoothField {
    BoothCode,
    Name,
    Constituency,
    Block,
    Panchayat,
    TotalVoters,
    Sensitivity,
    CoordinatorName,
    Address,
}

impl RecordField for BoothField {
    fn name(&self) -> &'static str {
        match self {
            BoothField::BoothCode => "booth_code",
            BoothField::Name => "name",
            BoothField::Constituency => "constituency",
            BoothField::Block => "block",
            BoothField::Panchayat => "panchayat",
            BoothField::TotalVoters => "total_voters",
            BoothField::Sensitivity => "sensitivity",
            BoothField::CoordinatorName => "coordinator_name",
            BoothField::Address => "address",
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            BoothField::BoothCode => FieldKind::Identifier,
            BoothField::Name | BoothField::CoordinatorName | BoothField::Address => FieldKind::Text,
            BoothField::Constituency
            | BoothField::Block
            | BoothField::Panchayat
            | BoothField::Sensitivity => FieldKind::Categorical,
            BoothField::TotalVoters => FieldKind::Numeric,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "booth_code" => Some(BoothField::BoothCode),
            "name" => Some(BoothField::Name),
            "constituency" => Some(BoothField::Constituency),
            "block" => Some(BoothField::Block),
            "panchayat" => Some(BoothField::Panchayat),
            "total_voters" => Some(BoothField::TotalVoters),
            "sensitivity" => Some(BoothField::Sensitivity),
            "coordinator_name" => Some(BoothField::CoordinatorName),
            "address" => Some(BoothField::Address),
            _ => None,
        }
    }
}

const SEARCH_FIELDS: [BoothField; 4] = [
    BoothField::BoothCode,
    BoothField::Name,
    BoothField::Address,
    BoothField::CoordinatorName,
];

impl FilterableRecord for BoothRecord {
    type Field = BoothField;

    const RESOURCE: Resource = Resource::Booths;

    fn value(&self, field: BoothField) -> FieldValue<'_> {
        match field {
            BoothField::BoothCode => FieldValue::text(&self.booth_code),
            BoothField::Name => FieldValue::text(&self.name),
            BoothField::Constituency => FieldValue::opt_text(self.constituency.as_deref()),
            BoothField::Block => FieldValue::opt_text(self.block.as_deref()),
            BoothField::Panchayat => FieldValue::opt_text(self.panchayat.as_deref()),
            BoothField::TotalVoters => FieldValue::opt_number(self.total_voters),
            BoothField::Sensitivity => FieldValue::opt_text(self.sensitivity.as_deref()),
            BoothField::CoordinatorName => FieldValue::opt_text(self.coordinator_name.as_deref()),
            BoothField::Address => FieldValue::opt_text(self.address.as_deref()),
        }
    }

    fn search_fields() -> &'static [BoothField] {
        &SEARCH_FIELDS
    }

    fn parse_filter(key: &str, value: &str) -> Option<FilterPredicate<BoothField>> {
        let predicate = match key {
            "constituency" => FilterPredicate::equals(BoothField::Constituency, value),
            "block" => FilterPredicate::equals(BoothField::Block, value),
            "panchayat" => FilterPredicate::equals(BoothField::Panchayat, value),
            "sensitivity" => FilterPredicate::equals(BoothField::Sensitivity, value),
            "total_voters" | "voters" => {
                let (min, max) = parse_range(value)?;
                FilterPredicate::range(BoothField::TotalVoters, min, max)
            }
            "coordinator" => FilterPredicate::contains(BoothField::CoordinatorName, value),
            _ => return None,
        };
        Some(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::filter::{FilterEngine, FilterSelection};

    fn booth(code: &str, block: &str, total_voters: Option<u32>, sensitivity: &str) -> BoothRecord {
        BoothRecord {
            booth_code: code.to_string(),
            name: format!("Primary School {}", code),
            constituency: Some("Danapur".to_string()),
            block: Some(block.to_string()),
            panchayat: None,
            total_voters,
            sensitivity: Some(sensitivity.to_string()),
            coordinator_name: None,
            address: None,
        }
    }

    #[test]
    fn test_block_and_size_filters() {
        let booths = vec![
            booth("B-101", "Danapur", Some(850), "normal"),
            booth("B-102", "Danapur", Some(1240), "sensitive"),
            booth("B-201", "Maner", Some(990), "Sensitive"),
            booth("B-202", "Maner", None, "normal"),
        ];
        let engine = FilterEngine::default();

        let parsed = FilterSelection::new().set("total_voters", "900-1300").into_spec::<BoothRecord>();
        let codes: Vec<&str> = engine.apply(&booths, &parsed.spec).iter().map(|b| b.booth_code.as_str()).collect();
        assert_eq!(codes, vec!["B-102", "B-201"]);

        let parsed = FilterSelection::new()
            .set("sensitivity", "sensitive")
            .set("block", "maner")
            .into_spec::<BoothRecord>();
        let codes: Vec<&str> = engine.apply(&booths, &parsed.spec).iter().map(|b| b.booth_code.as_str()).collect();
        assert_eq!(codes, vec!["B-201"]);
    }

    #[test]
    fn test_unknown_booth_key() {
        assert!(BoothRecord::parse_filter("gender", "F").is_none());
        assert_eq!(BoothField::from_name("total_voters"), Some(BoothField::TotalVoters));
    }
}
