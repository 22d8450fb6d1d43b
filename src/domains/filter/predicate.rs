use crate::domains::demographics::{AllianceResolver, CasteCategoryMapper};
use crate::domains::filter::record::FieldValue;

/// Screen value meaning "no filter on this key"
pub const ALL_SENTINEL: &str = "all";

/// Value derivations usable by `DerivedEquals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// caste label -> General/OBC/SC/ST/EBC
    CasteCategory,
    /// age -> one of `AGE_BRACKETS`
    AgeBracket,
}

impl Derivation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Derivation::CasteCategory => "caste_category",
            Derivation::AgeBracket => "age_bracket",
        }
    }

    /// `None` whenever the source value cannot be derived from.
    pub fn derive(&self, value: FieldValue<'_>, castes: &CasteCategoryMapper) -> Option<&'static str> {
        match self {
            Derivation::CasteCategory => value.as_text().map(|label| castes.category_of(label).as_str()),
            Derivation::AgeBracket => value.as_number().and_then(age_bracket),
        }
    }
}

/// Labels `age_bracket` can produce, youngest first. Under 18 has none.
pub const AGE_BRACKETS: [&str; 5] = ["18-25", "26-35", "36-45", "46-59", "60+"];

pub fn is_age_bracket(label: &str) -> bool {
    AGE_BRACKETS.contains(&label.trim())
}

pub fn age_bracket(age: f64) -> Option<&'static str> {
    if !age.is_finite() || age < 18.0 {
        return None;
    }
    let index = match age.floor() as u32 {
        18..=25 => 0,
        26..=35 => 1,
        36..=45 => 2,
        46..=59 => 3,
        _ => 4,
    };
    Some(AGE_BRACKETS[index])
}

/// Named-set lookups usable by `SetMembership`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetResolver {
    Alliance,
}

impl SetResolver {
    pub fn resolve<'a>(&self, key: &str, alliances: &'a AllianceResolver) -> &'a [String] {
        match self {
            SetResolver::Alliance => alliances.members_of(key),
        }
    }
}

/// One typed filter over the fields `F` of a record schema.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPredicate<F> {
    Equals {
        field: F,
        value: String,
    },
    /// Inclusive on both ends; an absent bound is open.
    Range {
        field: F,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Case-insensitive substring
    Contains {
        field: F,
        needle: String,
    },
    DerivedEquals {
        field: F,
        derive: Derivation,
        value: String,
    },
    /// Satisfied when any of `fields` holds a member of the resolved set.
    SetMembership {
        fields: Vec<F>,
        resolver: SetResolver,
        key: String,
    },
}

impl<F: Copy> FilterPredicate<F> {
    pub fn equals(field: F, value: impl Into<String>) -> Self {
        FilterPredicate::Equals { field, value: value.into() }
    }

    pub fn range(field: F, min: Option<f64>, max: Option<f64>) -> Self {
        FilterPredicate::Range { field, min, max }
    }

    pub fn contains(field: F, needle: impl Into<String>) -> Self {
        FilterPredicate::Contains { field, needle: needle.into() }
    }

    pub fn derived_equals(field: F, derive: Derivation, value: impl Into<String>) -> Self {
        FilterPredicate::DerivedEquals { field, derive, value: value.into() }
    }

    pub fn set_membership(fields: &[F], resolver: SetResolver, key: impl Into<String>) -> Self {
        FilterPredicate::SetMembership {
            fields: fields.to_vec(),
            resolver,
            key: key.into(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            FilterPredicate::Equals { .. } => "equals",
            FilterPredicate::Range { .. } => "range",
            FilterPredicate::Contains { .. } => "contains",
            FilterPredicate::DerivedEquals { .. } => "derived_equals",
            FilterPredicate::SetMembership { .. } => "set_membership",
        }
    }

    /// Counted by the "clear filters" badge: the value is neither "" nor "all".
    pub fn is_active(&self) -> bool {
        let value = match self {
            FilterPredicate::Range { .. } => return true,
            FilterPredicate::Equals { value, .. } => value,
            FilterPredicate::Contains { needle, .. } => needle,
            FilterPredicate::DerivedEquals { value, .. } => value,
            FilterPredicate::SetMembership { key, .. } => key,
        };
        !value.is_empty() && value != ALL_SENTINEL
    }
}

/// Ordered predicates combined with logical AND.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec<F> {
    predicates: Vec<FilterPredicate<F>>,
}

impl<F: Copy> FilterSpec<F> {
    pub fn new() -> Self {
        Self { predicates: Vec::new() }
    }

    pub fn with(mut self, predicate: FilterPredicate<F>) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn push(&mut self, predicate: FilterPredicate<F>) {
        self.predicates.push(predicate);
    }

    pub fn predicates(&self) -> &[FilterPredicate<F>] {
        &self.predicates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterPredicate<F>> {
        self.predicates.iter()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.predicates.iter().filter(|p| p.is_active()).count()
    }
}

impl<F: Copy> Default for FilterSpec<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> From<Vec<FilterPredicate<F>>> for FilterSpec<F> {
    fn from(predicates: Vec<FilterPredicate<F>>) -> Self {
        Self { predicates }
    }
}

impl<F> FromIterator<FilterPredicate<F>> for FilterSpec<F> {
    fn from_iter<I: IntoIterator<Item = FilterPredicate<F>>>(iter: I) -> Self {
        Self { predicates: iter.into_iter().collect() }
    }
}
