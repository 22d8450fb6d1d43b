pub mod types;

pub use types::{ConstituencyField, ConstituencyRecord};
