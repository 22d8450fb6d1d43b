pub mod alliance;
pub mod caste;

pub use alliance::AllianceResolver;
pub use caste::{CasteCategoryMapper, Category};
