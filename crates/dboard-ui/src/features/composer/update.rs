//! New-post composer reducer.

use dboard_core::api::DiscussionThread;
use dboard_core::context::BoardContext;
use dboard_core::topics::TopicTree;
use tracing::{debug, warn};

use super::state::ComposerState;
use crate::common::{RequestId, RequestSeq};
use crate::effects::UiEffect;

/// Validates the form and, if it passes, starts the create request.
pub fn submit(
    composer: &mut ComposerState,
    tree: &TopicTree,
    ctx: &BoardContext,
    seq: &mut RequestSeq,
) -> Vec<UiEffect> {
    if composer.request.is_running() {
        debug!("ignoring submit while a post is in flight");
        return vec![];
    }
    match composer.validate(tree, ctx) {
        Ok((commentable_id, thread)) => {
            let id = seq.next_id();
            composer.request.start(id);
            composer.error = None;
            vec![UiEffect::CreateThread {
                id,
                commentable_id,
                thread,
            }]
        }
        Err(err) => {
            composer.error = Some(err.to_string());
            vec![]
        }
    }
}

/// Returns the created thread when `id` is the submission being awaited.
pub fn handle_created(
    composer: &mut ComposerState,
    id: RequestId,
    result: Result<DiscussionThread, String>,
) -> Option<DiscussionThread> {
    if !composer.request.finish_if_active(id) {
        debug!(request = id.0, "dropping stale create response");
        return None;
    }
    match result {
        Ok(thread) => {
            composer.reset();
            Some(thread)
        }
        Err(error) => {
            warn!(%error, "failed to create thread");
            composer.error = Some(error);
            None
        }
    }
}
