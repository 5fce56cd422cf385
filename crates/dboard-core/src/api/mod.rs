//! Discussion HTTP API: wire types and the JSON client.
//!
//! ## Module Structure
//!
//! - `types.rs`: Request/response payloads
//! - `client.rs`: `DiscussionClient` (reqwest) and `ApiError`

pub mod client;
pub mod types;

pub use client::{ApiError, ApiResult, DiscussionClient};
pub use types::{
    DiscussionThread, ListingRequest, NewThread, SearchRequest, ThreadPage, UserMatch,
    UserSearchResponse,
};
