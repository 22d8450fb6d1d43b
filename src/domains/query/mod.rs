pub mod facade;
pub mod types;

pub use facade::{search, QueryFacade};
pub use types::{QueryRequest, SortDirection, SortRequest, SortSpec, VisiblePage};
