//! Cross-slice state mutations.
//!
//! Feature reducers only own their slice. When handling an event requires a
//! change in another slice, they return a mutation and the main reducer
//! applies it.

use dboard_core::api::DiscussionThread;

#[derive(Debug, Clone, PartialEq)]
pub enum StateMutation {
    Topics(TopicsMutation),
    Search(SearchMutation),
    Threads(ThreadMutation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicsMutation {
    /// Rebuild breadcrumbs from the current selection.
    ResetBreadcrumbs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMutation {
    /// Alerts, search box, phase and in-flight search requests.
    ClearSearch,
    /// Only the search box text.
    ClearSearchBox,
    ClearAlerts,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ThreadMutation {
    /// Replace a thread in place, or add it to the head of the list.
    Upsert(DiscussionThread),
    Remove(String),
}
