//! Thread search, user search and search alerts.

mod alerts;
mod state;
mod update;

pub use alerts::{AlertHandle, SearchAlert, SearchAlertBank};
pub use state::{SearchPhase, SearchState};
pub use update::{
    NO_RESULTS_MESSAGE, USER_ALERT_CLASS, clear_search, correction_message,
    handle_thread_search_result, handle_user_search_result, search_for, user_alert_message,
};
