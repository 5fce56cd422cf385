use dboard_core::api::{DiscussionClient, NewThread};

use crate::common::RequestId;
use crate::events::{ComposerUiEvent, UiEvent};

/// Posts a new thread.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn create_thread(
    client: DiscussionClient,
    id: RequestId,
    commentable_id: String,
    thread: NewThread,
) -> UiEvent {
    let result = client
        .create_thread(&commentable_id, &thread)
        .await
        .map_err(|err| format!("Failed to create post: {err}"));
    UiEvent::Composer(ComposerUiEvent::Created { id, result })
}
