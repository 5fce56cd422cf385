//! CLI command handlers.

pub mod config;
pub mod route;
pub mod search;
pub mod topics;
