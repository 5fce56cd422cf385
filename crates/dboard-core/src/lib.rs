//! Core discussion board library (topic tree, filtering, wire types, config).

pub mod api;
pub mod config;
pub mod context;
pub mod topics;
