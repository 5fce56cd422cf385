use super::alerts::SearchAlertBank;
use crate::common::RequestState;

/// Lifecycle of the current search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching {
        text: String,
    },
    ResultsReady {
        text: String,
        results_count: usize,
    },
    Failed {
        text: String,
        error: String,
    },
}

#[derive(Debug, Default)]
pub struct SearchState {
    pub phase: SearchPhase,
    /// Text shown in the search input.
    pub box_text: String,
    pub alerts: SearchAlertBank,
    pub thread_request: RequestState,
    /// The username search chained to the latest successful thread search.
    pub user_request: RequestState,
}

impl SearchState {
    pub fn is_searching(&self) -> bool {
        matches!(self.phase, SearchPhase::Searching { .. })
    }

    pub fn clear_box(&mut self) {
        self.box_text.clear();
    }
}
