//! Board events.
//!
//! Everything that can change board state arrives as a `UiEvent`: user
//! intents from the embedding page and completions of spawned effects.
//! Async results carry the id of the request that produced them.

use dboard_core::api::{DiscussionThread, SearchRequest, ThreadPage, UserSearchResponse};

use crate::common::RequestId;
use crate::features::search::AlertHandle;
use crate::features::threads::ThreadSource;
use crate::features::topics::Selection;
use crate::router::Route;

#[derive(Debug, Clone)]
pub enum UiEvent {
    Topics(TopicsUiEvent),
    Search(SearchUiEvent),
    Threads(ThreadUiEvent),
    Route(RouteUiEvent),
    Composer(ComposerUiEvent),
}

#[derive(Debug, Clone)]
pub enum TopicsUiEvent {
    FilterChanged(String),
    Select(Selection),
    /// Cohort scope change; only honored when the user may select groups.
    SetGroup(Option<String>),
}

#[derive(Debug, Clone)]
pub enum SearchUiEvent {
    Submit(String),
    Clear,
    DismissAlert(AlertHandle),
    ThreadSearchCompleted {
        id: RequestId,
        request: SearchRequest,
        result: Result<ThreadPage, String>,
    },
    UserSearchCompleted {
        id: RequestId,
        username: String,
        result: Result<UserSearchResponse, String>,
    },
}

#[derive(Debug, Clone)]
pub enum ThreadUiEvent {
    Select { thread_id: String },
    LoadMore,
    Loaded {
        id: RequestId,
        source: ThreadSource,
        append: bool,
        result: Result<ThreadPage, String>,
    },
    /// A thread was edited or created outside the board.
    Updated(DiscussionThread),
    Removed { thread_id: String },
}

#[derive(Debug, Clone)]
pub enum RouteUiEvent {
    /// Initial location when the board is mounted.
    Start { fragment: String },
    Navigate(Route),
    /// The location changed outside the board (address bar, history).
    FragmentChanged(String),
    Back,
    Forward,
}

#[derive(Debug, Clone)]
pub enum ComposerUiEvent {
    Open,
    Cancel,
    Edit(ComposerField),
    Submit,
    Created {
        id: RequestId,
        result: Result<DiscussionThread, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerField {
    Title(String),
    Body(String),
    Topic(String),
    Follow(bool),
    Anonymous(bool),
    AnonymousToPeers(bool),
    Group(Option<String>),
}
