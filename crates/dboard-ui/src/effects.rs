//! Board effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and event publication only; the reducer never talks to
//! the network or to subscribers directly.

use dboard_core::api::{ListingRequest, NewThread, SearchRequest};

use crate::bus::BoardEvent;
use crate::common::RequestId;
use crate::features::threads::ThreadSource;

/// Which endpoint a thread load goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadQuery {
    All(ListingRequest),
    Following(ListingRequest),
    Search(SearchRequest),
}

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    /// Run a thread-text search. Completes with `SearchUiEvent::ThreadSearchCompleted`.
    ThreadSearch { id: RequestId, request: SearchRequest },

    /// Run the username search that follows a successful thread search.
    UserSearch { id: RequestId, username: String },

    /// Fetch a page of threads for a listing (or a further page of search results).
    LoadThreads {
        id: RequestId,
        source: ThreadSource,
        query: ThreadQuery,
        append: bool,
    },

    /// Submit a new thread under a leaf topic.
    CreateThread {
        id: RequestId,
        commentable_id: String,
        thread: NewThread,
    },

    /// Publish a board event to subscribers.
    Emit(BoardEvent),
}
