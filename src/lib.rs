//! Access control and record filtering for the canvassing app.
//!
//! Rust callers build an [`AccessCore`] and query through its facade. The
//! mobile host goes through the C functions in [`ffi`], which share one core
//! built by `canvass_initialize`.

// Public modules
pub mod auth;
pub mod config;
pub mod domains;
pub mod errors;
pub mod ffi;
pub mod globals;
pub mod types;
pub mod validation;

pub use config::CoreConfig;
pub use domains::core::AccessCore;
pub use domains::permission::PermissionRegistry;
pub use domains::query::{QueryFacade, QueryRequest, VisiblePage};

/// Builds the process-wide core used by the FFI layer.
/// This function must be called before any other FFI function.
pub fn initialize(config: CoreConfig) -> errors::ServiceResult<()> {
    globals::initialize(config)
}
