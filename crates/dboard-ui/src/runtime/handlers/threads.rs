use dboard_core::api::DiscussionClient;

use crate::common::RequestId;
use crate::effects::ThreadQuery;
use crate::events::{ThreadUiEvent, UiEvent};
use crate::features::threads::ThreadSource;

/// Loads one page of threads from whichever endpoint `query` names.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn load_threads(
    client: DiscussionClient,
    id: RequestId,
    source: ThreadSource,
    query: ThreadQuery,
    append: bool,
) -> UiEvent {
    let result = match &query {
        ThreadQuery::All(request) => client.list_threads(request).await,
        ThreadQuery::Following(request) => client.followed_threads(request).await,
        ThreadQuery::Search(request) => client.search_threads(request).await,
    }
    .map_err(|err| format!("Failed to load threads: {err}"));

    UiEvent::Threads(ThreadUiEvent::Loaded {
        id,
        source,
        append,
        result,
    })
}
