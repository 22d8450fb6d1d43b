pub mod types;

pub use types::{BoothField, BoothRecord};
