use dboard_core::api::{DiscussionThread, ThreadPage};

use crate::common::RequestState;
use crate::mutations::ThreadMutation;

/// Where the listed threads came from; decides what "load more" fetches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ThreadSource {
    #[default]
    All,
    Following,
    Topic {
        id: String,
        commentable_ids: String,
    },
    Search {
        text: String,
        commentable_ids: Option<String>,
    },
}

impl ThreadSource {
    pub fn is_search(&self) -> bool {
        matches!(self, ThreadSource::Search { .. })
    }
}

/// The thread collection shown next to the sidebar.
#[derive(Debug, Clone, Default)]
pub struct ThreadListState {
    pub threads: Vec<DiscussionThread>,
    pub page: u32,
    pub num_pages: u32,
    pub source: ThreadSource,
    pub selected: Option<String>,
    /// Listing (or load-more) request in flight.
    pub request: RequestState,
    /// Source whose first page was requested but has not replaced the list yet.
    pub pending: Option<ThreadSource>,
}

impl ThreadListState {
    pub fn new(initial: ThreadPage) -> Self {
        let mut state = Self::default();
        state.replace(ThreadSource::All, initial);
        state
    }

    pub fn replace(&mut self, source: ThreadSource, page: ThreadPage) {
        self.threads = page.discussion_data;
        self.page = page.page;
        self.num_pages = page.num_pages;
        self.source = source;
        self.pending = None;
    }

    /// The source the list is showing or about to show.
    pub fn current_source(&self) -> &ThreadSource {
        self.pending.as_ref().unwrap_or(&self.source)
    }

    /// Appends a further page, skipping threads already listed.
    pub fn append(&mut self, page: ThreadPage) {
        for thread in page.discussion_data {
            if !self.threads.iter().any(|t| t.id == thread.id) {
                self.threads.push(thread);
            }
        }
        self.page = page.page;
        self.num_pages = page.num_pages;
    }

    /// Applies an in-place change. Returns whether the collection changed.
    pub fn apply(&mut self, mutation: ThreadMutation) -> bool {
        match mutation {
            ThreadMutation::Upsert(thread) => {
                if let Some(existing) = self.threads.iter_mut().find(|t| t.id == thread.id) {
                    *existing = thread;
                } else {
                    self.threads.insert(0, thread);
                }
                true
            }
            ThreadMutation::Remove(id) => {
                let before = self.threads.len();
                self.threads.retain(|t| t.id != id);
                if self.selected.as_deref() == Some(id.as_str()) {
                    self.selected = None;
                }
                self.threads.len() != before
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<&DiscussionThread> {
        self.threads.iter().find(|t| t.id == id)
    }

    pub fn has_more(&self) -> bool {
        self.page < self.num_pages
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}
