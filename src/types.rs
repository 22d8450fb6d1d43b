use serde::{Deserialize, Serialize};

use crate::errors::DomainResult;
use crate::validation::{Validate, ValidationBuilder};

// Re-export the access-control vocabulary used all over the crate
pub use crate::domains::demographics::Category;
pub use crate::domains::permission::{Action, Resource, Role};

/// Pagination parameters, 1-based
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

impl PaginationParams {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Page 0 becomes page 1; `per_page` is clamped to `1..=max_per_page`.
    pub fn normalized(&self, max_per_page: u32) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, max_per_page.max(1)),
        }
    }

    /// Index of the first item on this page, saturating on overflow
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1).saturating_mul(self.per_page as usize)
    }

    pub fn total_pages(&self, total: usize) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        let pages = total.div_ceil(self.per_page as usize);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

impl Validate for PaginationParams {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("page", Some(self.page)).min(1).validate()?;
        ValidationBuilder::new("per_page", Some(self.per_page)).min(1).validate()
    }
}
