use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Coarse reservation category derived from a caste label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "General")]
    General,
    #[serde(rename = "OBC")]
    Obc,
    #[serde(rename = "SC")]
    Sc,
    #[serde(rename = "ST")]
    St,
    #[serde(rename = "EBC")]
    Ebc,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Obc => "OBC",
            Category::Sc => "SC",
            Category::St => "ST",
            Category::Ebc => "EBC",
        }
    }

    /// Case-insensitive, since screens send both "obc" and "OBC"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Some(Category::General),
            "obc" => Some(Category::Obc),
            "sc" => Some(Category::Sc),
            "st" => Some(Category::St),
            "ebc" => Some(Category::Ebc),
            _ => None,
        }
    }

    pub fn all() -> [Category; 5] {
        [Category::General, Category::Obc, Category::Sc, Category::St, Category::Ebc]
    }
}

const DEFAULT_CASTES: &[(&str, Category)] = &[
    ("Brahmin", Category::General),
    ("Bhumihar", Category::General),
    ("Rajput", Category::General),
    ("Kayastha", Category::General),
    ("Yadav", Category::Obc),
    ("Kurmi", Category::Obc),
    ("Koeri", Category::Obc),
    ("Kushwaha", Category::Obc),
    ("Bania", Category::Obc),
    ("Teli", Category::Ebc),
    ("Mallah", Category::Ebc),
    ("Nai", Category::Ebc),
    ("Kahar", Category::Ebc),
    ("Dhanuk", Category::Ebc),
    ("Nonia", Category::Ebc),
    ("Paswan", Category::Sc),
    ("Dusadh", Category::Sc),
    ("Ravidas", Category::Sc),
    ("Chamar", Category::Sc),
    ("Musahar", Category::Sc),
    ("Pasi", Category::Sc),
    ("Dhobi", Category::Sc),
    ("Santhal", Category::St),
    ("Oraon", Category::St),
    ("Munda", Category::St),
    ("Tharu", Category::St),
];

/// Maps fine-grained caste labels to a `Category`.
///
/// Lookup is exact. Labels that are not in the table fall back to
/// `Category::General`; use [`CasteCategoryMapper::lookup`] to tell a real
/// General label apart from a defaulted one.
#[derive(Debug, Clone)]
pub struct CasteCategoryMapper {
    table: HashMap<String, Category>,
}

impl CasteCategoryMapper {
    pub fn new(table: HashMap<String, Category>) -> Self {
        Self { table }
    }

    pub fn from_config(castes: &BTreeMap<String, Category>) -> Self {
        Self::new(castes.iter().map(|(label, category)| (label.clone(), *category)).collect())
    }

    pub fn category_of(&self, caste_label: &str) -> Category {
        self.lookup(caste_label).unwrap_or(Category::General)
    }

    pub fn lookup(&self, caste_label: &str) -> Option<Category> {
        self.table.get(caste_label).copied()
    }

    /// Labels mapped to `category`, sorted
    pub fn labels_in(&self, category: Category) -> Vec<&str> {
        let mut labels: Vec<&str> = self
            .table
            .iter()
            .filter(|(_, c)| **c == category)
            .map(|(label, _)| label.as_str())
            .collect();
        labels.sort_unstable();
        labels
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for CasteCategoryMapper {
    fn default() -> Self {
        Self::new(
            DEFAULT_CASTES
                .iter()
                .map(|(label, category)| (label.to_string(), *category))
                .collect(),
        )
    }
}
