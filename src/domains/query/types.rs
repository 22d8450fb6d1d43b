use serde::{Deserialize, Serialize};

use crate::domains::filter::{FilterSpec, RecordField};
use crate::types::PaginationParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F> SortSpec<F> {
    pub fn ascending(field: F) -> Self {
        Self { field, direction: SortDirection::Ascending }
    }

    pub fn descending(field: F) -> Self {
        Self { field, direction: SortDirection::Descending }
    }
}

/// Sort as the host app sends it, by field name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRequest {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortRequest {
    /// `None` (keep input order) when the field is not part of the schema.
    pub fn to_spec<F: RecordField>(&self) -> Option<SortSpec<F>> {
        match F::from_name(&self.field) {
            Some(field) => Some(SortSpec { field, direction: self.direction }),
            None => {
                log::warn!("Ignoring sort on unknown field '{}'", self.field);
                None
            }
        }
    }
}

/// Everything a list screen asks for besides the role and the records
#[derive(Debug, Clone)]
pub struct QueryRequest<F> {
    pub search_text: Option<String>,
    pub filters: FilterSpec<F>,
    pub sort: Option<SortSpec<F>>,
    pub page: Option<PaginationParams>,
}

impl<F: Copy> QueryRequest<F> {
    pub fn new() -> Self {
        Self {
            search_text: None,
            filters: FilterSpec::new(),
            sort: None,
            page: None,
        }
    }

    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = Some(search_text.into());
        self
    }

    pub fn with_filters(mut self, filters: FilterSpec<F>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec<F>) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_page(mut self, page: PaginationParams) -> Self {
        self.page = Some(page);
        self
    }
}

impl<F: Copy> Default for QueryRequest<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// What a list screen renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisiblePage<R> {
    pub records: Vec<R>,
    /// Matches after search and filters, before paging
    pub total_count: usize,
    pub active_filter_count: usize,
    pub permission_denied: bool,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub total_pages: Option<u32>,
    /// Screen filter keys that could not be applied
    pub ignored_filters: Vec<String>,
}

impl<R> VisiblePage<R> {
    pub fn denied() -> Self {
        Self {
            records: Vec::new(),
            total_count: 0,
            active_filter_count: 0,
            permission_denied: true,
            page: None,
            per_page: None,
            total_pages: None,
            ignored_filters: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
