use serde::{Deserialize, Serialize};

use crate::domains::demographics::Category;
use crate::domains::filter::{
    is_age_bracket, parse_flag, parse_range, Derivation, FieldKind, FieldValue, FilterPredicate,
    FilterableRecord, RecordField, SetResolver,
};
use crate::domains::permission::Resource;

/// One voter as delivered by the data-fetch layer. Read-only to the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoterRecord {
    pub id: String,
    /// EPIC (voter identity card) number
    pub epic_id: String,
    pub name: String,
    /// Name spelled the way it is pronounced, for search in either script
    pub phonetic_name: Option<String>,
    pub relative_name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub caste: Option<String>,
    pub religion: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub booth_code: String,
    pub constituency: Option<String>,
    pub panchayat: Option<String>,
    /// Party the voter currently leans to
    pub current_preference: Option<String>,
    /// Party the voter chose last election
    pub prior_choice: Option<String>,
    pub support_level: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoterField {
    Id,
    EpicId,
    Name,
    PhoneticName,
    RelativeName,
    Gender,
    Age,
    Caste,
    Religion,
    Phone,
    Address,
    BoothCode,
    Constituency,
    Panchayat,
    CurrentPreference,
    PriorChoice,
    SupportLevel,
    Verified,
}

impl RecordField for VoterField {
    fn name(&self) -> &'static str {
        match self {
            VoterField::Id => "id",
            VoterField::EpicId => "epic_id",
            VoterField::Name => "name",
            VoterField::PhoneticName => "phonetic_name",
            VoterField::RelativeName => "relative_name",
            VoterField::Gender => "gender",
            VoterField::Age => "age",
            VoterField::Caste => "caste",
            VoterField::Religion => "religion",
            VoterField::Phone => "phone",
            VoterField::Address => "address",
            VoterField::BoothCode => "booth_code",
            VoterField::Constituency => "constituency",
            VoterField::Panchayat => "panchayat",
            VoterField::CurrentPreference => "current_preference",
            VoterField::PriorChoice => "prior_choice",
            VoterField::SupportLevel => "support_level",
            VoterField::Verified => "verified",
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            VoterField::Id | VoterField::EpicId | VoterField::Phone | VoterField::BoothCode => {
                FieldKind::Identifier
            }
            VoterField::Name
            | VoterField::PhoneticName
            | VoterField::RelativeName
            | VoterField::Address => FieldKind::Text,
            VoterField::Gender
            | VoterField::Caste
            | VoterField::Religion
            | VoterField::Constituency
            | VoterField::Panchayat
            | VoterField::CurrentPreference
            | VoterField::PriorChoice
            | VoterField::SupportLevel => FieldKind::Categorical,
            VoterField::Age => FieldKind::Numeric,
            VoterField::Verified => FieldKind::Flag,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(VoterField::Id),
            "epic_id" => Some(VoterField::EpicId),
            "name" => Some(VoterField::Name),
            "phonetic_name" => Some(VoterField::PhoneticName),
            "relative_name" => Some(VoterField::RelativeName),
            "gender" => Some(VoterField::Gender),
            "age" => Some(VoterField::Age),
            "caste" => Some(VoterField::Caste),
            "religion" => Some(VoterField::Religion),
            "phone" => Some(VoterField::Phone),
            "address" => Some(VoterField::Address),
            "booth_code" => Some(VoterField::BoothCode),
            "constituency" => Some(VoterField::Constituency),
            "panchayat" => Some(VoterField::Panchayat),
            "current_preference" => Some(VoterField::CurrentPreference),
            "prior_choice" => Some(VoterField::PriorChoice),
            "support_level" => Some(VoterField::SupportLevel),
            "verified" => Some(VoterField::Verified),
            _ => None,
        }
    }
}

/// Party fields an alliance filter looks at
pub const ALLIANCE_FIELDS: [VoterField; 2] = [VoterField::CurrentPreference, VoterField::PriorChoice];

const SEARCH_FIELDS: [VoterField; 5] = [
    VoterField::Name,
    VoterField::PhoneticName,
    VoterField::EpicId,
    VoterField::Phone,
    VoterField::Address,
];

impl FilterableRecord for VoterRecord {
    type Field = VoterField;

    const RESOURCE: Resource = Resource::Voters;

    fn value(&self, field: VoterField) -> FieldValue<'_> {
        match field {
            VoterField::Id => FieldValue::text(&self.id),
            VoterField::EpicId => FieldValue::text(&self.epic_id),
            VoterField::Name => FieldValue::text(&self.name),
            VoterField::PhoneticName => FieldValue::opt_text(self.phonetic_name.as_deref()),
            VoterField::RelativeName => FieldValue::opt_text(self.relative_name.as_deref()),
            VoterField::Gender => FieldValue::opt_text(self.gender.as_deref()),
            VoterField::Age => FieldValue::opt_number(self.age),
            VoterField::Caste => FieldValue::opt_text(self.caste.as_deref()),
            VoterField::Religion => FieldValue::opt_text(self.religion.as_deref()),
            VoterField::Phone => FieldValue::opt_text(self.phone.as_deref()),
            VoterField::Address => FieldValue::opt_text(self.address.as_deref()),
            VoterField::BoothCode => FieldValue::text(&self.booth_code),
            VoterField::Constituency => FieldValue::opt_text(self.constituency.as_deref()),
            VoterField::Panchayat => FieldValue::opt_text(self.panchayat.as_deref()),
            VoterField::CurrentPreference => FieldValue::opt_text(self.current_preference.as_deref()),
            VoterField::PriorChoice => FieldValue::opt_text(self.prior_choice.as_deref()),
            VoterField::SupportLevel => FieldValue::opt_text(self.support_level.as_deref()),
            VoterField::Verified => FieldValue::Flag(self.verified),
        }
    }

    fn search_fields() -> &'static [VoterField] {
        &SEARCH_FIELDS
    }

    fn parse_filter(key: &str, value: &str) -> Option<FilterPredicate<VoterField>> {
        let predicate = match key {
            "gender" => FilterPredicate::equals(VoterField::Gender, value),
            "caste" => FilterPredicate::equals(VoterField::Caste, value),
            "caste_category" | "category" => {
                // An unknown category would match nobody; report it instead
                let category = Category::from_str(value)?;
                FilterPredicate::derived_equals(VoterField::Caste, Derivation::CasteCategory, category.as_str())
            }
            "religion" => FilterPredicate::equals(VoterField::Religion, value),
            "booth_code" | "booth" => FilterPredicate::equals(VoterField::BoothCode, value),
            "constituency" => FilterPredicate::equals(VoterField::Constituency, value),
            "panchayat" => FilterPredicate::equals(VoterField::Panchayat, value),
            "party" | "current_preference" => FilterPredicate::equals(VoterField::CurrentPreference, value),
            "prior_choice" => FilterPredicate::equals(VoterField::PriorChoice, value),
            "alliance" => FilterPredicate::set_membership(&ALLIANCE_FIELDS, SetResolver::Alliance, value),
            "age" => {
                let (min, max) = parse_range(value)?;
                FilterPredicate::range(VoterField::Age, min, max)
            }
            "age_group" => {
                if !is_age_bracket(value) {
                    return None;
                }
                FilterPredicate::derived_equals(VoterField::Age, Derivation::AgeBracket, value.trim())
            }
            "support_level" => FilterPredicate::equals(VoterField::SupportLevel, value),
            "address" => FilterPredicate::contains(VoterField::Address, value),
            "verified" => {
                parse_flag(value)?;
                FilterPredicate::equals(VoterField::Verified, value)
            }
            _ => return None,
        };
        Some(predicate)
    }
}
