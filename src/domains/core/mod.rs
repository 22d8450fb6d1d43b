pub mod access_core;

pub use access_core::AccessCore;
