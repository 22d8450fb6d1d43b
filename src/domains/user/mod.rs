pub mod types;

pub use types::{UserField, UserRecord};
