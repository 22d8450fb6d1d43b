use std::cmp::Ordering;
use std::fmt;

use crate::domains::filter::predicate::FilterPredicate;
use crate::domains::permission::Resource;

/// How a field's values compare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Ids and codes: exact, case-sensitive
    Identifier,
    /// Free text: exact on `Equals`, case-folded on `Contains`
    Text,
    /// Small closed vocabularies (gender, party, religion): case-insensitive
    Categorical,
    Numeric,
    Flag,
}

/// Typed view of one field of one record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Flag(bool),
    Missing,
}

impl<'a> FieldValue<'a> {
    /// Blank strings count as missing so they never match a category or a party.
    pub fn text(value: &'a str) -> Self {
        if value.trim().is_empty() {
            FieldValue::Missing
        } else {
            FieldValue::Text(value)
        }
    }

    pub fn opt_text(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::text)
    }

    pub fn opt_number(value: Option<u32>) -> Self {
        value.map_or(FieldValue::Missing, |n| FieldValue::Number(f64::from(n)))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(text) => Some(*text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    /// Ordering used by sorted list screens. Text compares case-insensitively.
    /// Mixed kinds order Number < Text < Flag < Missing.
    pub fn sort_cmp(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (FieldValue::Flag(a), FieldValue::Flag(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Number(_) => 0,
            FieldValue::Text(_) => 1,
            FieldValue::Flag(_) => 2,
            FieldValue::Missing => 3,
        }
    }
}

/// Closed set of fields of one record schema.
pub trait RecordField: Copy + Eq + fmt::Debug + 'static {
    /// snake_case name used by screens and the host app
    fn name(&self) -> &'static str;

    fn kind(&self) -> FieldKind;

    fn from_name(name: &str) -> Option<Self>;
}

/// A record type the filter engine and query facade can work on.
pub trait FilterableRecord {
    type Field: RecordField;

    /// Resource whose permissions gate this record type
    const RESOURCE: Resource;

    fn value(&self, field: Self::Field) -> FieldValue<'_>;

    /// Fields the free-text search box looks at
    fn search_fields() -> &'static [Self::Field];

    /// Maps one screen filter key and its (non-empty) value to a predicate.
    /// Returns `None` for keys this schema does not know or values it cannot parse.
    fn parse_filter(key: &str, value: &str) -> Option<FilterPredicate<Self::Field>>;
}
