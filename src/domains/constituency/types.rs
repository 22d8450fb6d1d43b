use serde::{Deserialize, Serialize};

use crate::domains::filter::{
    parse_range, FieldKind, FieldValue, FilterPredicate, FilterableRecord, RecordField,
};
use crate::domains::permission::Resource;

/// Assembly constituency made up of booths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstituencyRecord {
    pub code: String,
    pub name: String,
    pub district: Option<String>,
    /// "General", "SC" or "ST" seat
    pub reserved_category: Option<String>,
    pub total_booths: Option<u32>,
    pub total_voters: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstituencyField {
    Code,
    Name,
    District,
    ReservedCategory,
    TotalBooths,
    TotalVoters,
}

impl RecordField for ConstituencyField {
    fn name(&self) -> &'static str {
        match self {
            ConstituencyField::Code => "code",
            ConstituencyField::Name => "name",
            ConstituencyField::District => "district",
            ConstituencyField::ReservedCategory => "reserved_category",
            ConstituencyField::TotalBooths => "total_booths",
            ConstituencyField::TotalVoters => "total_voters",
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            ConstituencyField::Code => FieldKind::Identifier,
            ConstituencyField::Name => FieldKind::Text,
            ConstituencyField::District | ConstituencyField::ReservedCategory => FieldKind::Categorical,
            ConstituencyField::TotalBooths | ConstituencyField::TotalVoters => FieldKind::Numeric,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "code" => Some(ConstituencyField::Code),
            "name" => Some(ConstituencyField::Name),
            "district" => Some(ConstituencyField::District),
            "reserved_category" => Some(ConstituencyField::ReservedCategory),
            "total_booths" => Some(ConstituencyField::TotalBooths),
            "total_voters" => Some(ConstituencyField::TotalVoters),
            _ => None,
        }
    }
}

const SEARCH_FIELDS: [ConstituencyField; 3] = [
    ConstituencyField::Code,
    ConstituencyField::Name,
    ConstituencyField::District,
];

impl FilterableRecord for ConstituencyRecord {
    type Field = ConstituencyField;

    const RESOURCE: Resource = Resource::Constituencies;

    fn value(&self, field: ConstituencyField) -> FieldValue<'_> {
        match field {
            ConstituencyField::Code => FieldValue::text(&self.code),
            ConstituencyField::Name => FieldValue::text(&self.name),
            ConstituencyField::District => FieldValue::opt_text(self.district.as_deref()),
            ConstituencyField::ReservedCategory => FieldValue::opt_text(self.reserved_category.as_deref()),
            ConstituencyField::TotalBooths => FieldValue::opt_number(self.total_booths),
            ConstituencyField::TotalVoters => FieldValue::opt_number(self.total_voters),
        }
    }

    fn search_fields() -> &'static [ConstituencyField] {
        &SEARCH_FIELDS
    }

    fn parse_filter(key: &str, value: &str) -> Option<FilterPredicate<ConstituencyField>> {
        let predicate = match key {
            "district" => FilterPredicate::equals(ConstituencyField::District, value),
            "reserved_category" | "reserved" => {
                FilterPredicate::equals(ConstituencyField::ReservedCategory, value)
            }
            "total_booths" => {
                let (min, max) = parse_range(value)?;
                FilterPredicate::range(ConstituencyField::TotalBooths, min, max)
            }
            "total_voters" => {
                let (min, max) = parse_range(value)?;
                FilterPredicate::range(ConstituencyField::TotalVoters, min, max)
            }
            _ => return None,
        };
        Some(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::filter::{FilterEngine, FilterSelection};

    #[test]
    fn test_reserved_seat_filter() {
        let constituencies: Vec<ConstituencyRecord> = serde_json::from_str(
            r#"[
                {"code":"AC-188","name":"Danapur","district":"Patna","reserved_category":"General","total_booths":312},
                {"code":"AC-189","name":"Maner","district":"Patna","reserved_category":"General","total_booths":298},
                {"code":"AC-190","name":"Phulwari","district":"Patna","reserved_category":"SC","total_booths":341}
            ]"#,
        )
        .unwrap();

        let parsed = FilterSelection::new()
            .set("reserved_category", "sc")
            .set("district", "Patna")
            .into_spec::<ConstituencyRecord>();
        let matched = FilterEngine::default().apply(&constituencies, &parsed.spec);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].code, "AC-190");

        let parsed = FilterSelection::new().set("total_booths", "300+").into_spec::<ConstituencyRecord>();
        assert_eq!(FilterEngine::default().count(&constituencies, &parsed.spec), 2);
    }
}
