pub mod has_permission;
pub mod types;

pub use has_permission::{PermissionRegistry, PermissionTable, PermissionTableBuilder};
pub use types::{Action, Resource, Role};
