//! Search coordinator.
//!
//! A thread search replaces the thread collection and posts correction or
//! no-result alerts. Only after it succeeds is the same text tried as a
//! username; matches become "Show posts by" alerts. Both steps carry the id
//! of the search that started them, so a superseded search can never touch
//! the board.

use dboard_core::api::{SearchRequest, ThreadPage, UserMatch, UserSearchResponse};
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::{debug, warn};

use super::state::{SearchPhase, SearchState};
use crate::bus::BoardEvent;
use crate::common::RequestId;
use crate::effects::UiEffect;
use crate::features::threads::{ThreadListState, ThreadSource};

pub const NO_RESULTS_MESSAGE: &str = "No threads matched your query.";
pub const USER_ALERT_CLASS: &str = "search-by-user";

/// Starts a thread search, superseding any search in flight.
pub fn search_for(
    search: &mut SearchState,
    id: RequestId,
    request: SearchRequest,
) -> Vec<UiEffect> {
    search.alerts.clear();
    search.box_text.clone_from(&request.text);
    search.thread_request.start(id);
    search.user_request.clear();
    search.phase = SearchPhase::Searching {
        text: request.text.clone(),
    };
    vec![UiEffect::ThreadSearch { id, request }]
}

pub fn handle_thread_search_result(
    search: &mut SearchState,
    threads: &mut ThreadListState,
    id: RequestId,
    request: SearchRequest,
    result: Result<ThreadPage, String>,
) -> Vec<UiEffect> {
    if !search.thread_request.finish_if_active(id) {
        debug!(request = id.0, text = %request.text, "dropping stale thread search response");
        return vec![];
    }

    let page = match result {
        Ok(page) => page,
        Err(error) => {
            warn!(text = %request.text, %error, "thread search failed");
            threads.pending = None;
            search.phase = SearchPhase::Failed {
                text: request.text,
                error,
            };
            return vec![];
        }
    };

    let results_count = page.discussion_data.len();
    let correction = page.correction().map(str::to_string);
    // Listing pages requested before the results arrived belong to the old list.
    threads.request.clear();
    threads.replace(
        ThreadSource::Search {
            text: request.text.clone(),
            commentable_ids: request.commentable_ids.clone(),
        },
        page,
    );
    threads.selected = None;

    search.alerts.clear();
    if let Some(corrected) = correction {
        search
            .alerts
            .add(correction_message(&request.text, &corrected));
    } else if results_count == 0 {
        search.alerts.add(NO_RESULTS_MESSAGE);
    }
    search.phase = SearchPhase::ResultsReady {
        text: request.text.clone(),
        results_count,
    };
    search.user_request.start(id);

    vec![
        UiEffect::Emit(BoardEvent::SearchCompleted {
            text: request.text.clone(),
            results_count,
        }),
        UiEffect::UserSearch {
            id,
            username: request.text,
        },
    ]
}

/// Adds one alert per matching user. Failures are not user-visible.
pub fn handle_user_search_result(
    search: &mut SearchState,
    course_id: &str,
    id: RequestId,
    username: &str,
    result: Result<UserSearchResponse, String>,
) {
    if !search.user_request.finish_if_active(id) {
        debug!(request = id.0, %username, "dropping stale user search response");
        return;
    }
    match result {
        Ok(response) => {
            for user in &response.users {
                search
                    .alerts
                    .add_with_class(user_alert_message(course_id, user), USER_ALERT_CLASS);
            }
        }
        Err(error) => debug!(%username, %error, "user search failed"),
    }
}

/// Drops alerts, box text and any search in flight.
pub fn clear_search(search: &mut SearchState) {
    search.alerts.clear();
    search.clear_box();
    search.thread_request.clear();
    search.user_request.clear();
    search.phase = SearchPhase::Idle;
}

pub fn correction_message(original: &str, corrected: &str) -> String {
    format!(
        "No results found for \"{}\". Showing results for \"{}\".",
        encode_text(original),
        encode_text(corrected)
    )
}

pub fn user_alert_message(course_id: &str, user: &UserMatch) -> String {
    let href = format!(
        "/courses/{course_id}/discussion/forum/users/{}",
        user.id
    );
    format!(
        "Show posts by <a class=\"link-jump\" href=\"{}\">{}</a>.",
        encode_double_quoted_attribute(&href),
        encode_text(&user.username)
    )
}
