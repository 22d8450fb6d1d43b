pub mod booth;
pub mod constituency;
pub mod core;
pub mod demographics;
pub mod filter;
pub mod permission;
pub mod query;
pub mod user;
pub mod voter;

