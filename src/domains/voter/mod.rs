pub mod summary;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use summary::VoterSummary;
pub use types::{VoterField, VoterRecord, ALLIANCE_FIELDS};
