use dboard_core::api::{DiscussionClient, SearchRequest};

use crate::common::RequestId;
use crate::events::{SearchUiEvent, UiEvent};

/// Runs a thread-text search.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn thread_search(
    client: DiscussionClient,
    id: RequestId,
    request: SearchRequest,
) -> UiEvent {
    let result = client
        .search_threads(&request)
        .await
        .map_err(|err| err.to_string());
    UiEvent::Search(SearchUiEvent::ThreadSearchCompleted {
        id,
        request,
        result,
    })
}

/// Runs the username search chained to thread search `id`.
pub async fn user_search(client: DiscussionClient, id: RequestId, username: String) -> UiEvent {
    let result = client
        .search_users(&username)
        .await
        .map_err(|err| err.to_string());
    UiEvent::Search(SearchUiEvent::UserSearchCompleted {
        id,
        username,
        result,
    })
}
