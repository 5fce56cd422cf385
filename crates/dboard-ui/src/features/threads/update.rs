//! Thread list reducer.

use dboard_core::api::{ListingRequest, SearchRequest, ThreadPage};
use dboard_core::context::SortKey;
use tracing::{debug, warn};

use super::state::{ThreadListState, ThreadSource};
use crate::common::{RequestId, RequestSeq};
use crate::effects::{ThreadQuery, UiEffect};
use crate::mutations::{SearchMutation, StateMutation};

/// Builds the endpoint query for `page` of `source`.
pub fn query_for(
    source: &ThreadSource,
    page: u32,
    sort_key: SortKey,
    group_id: Option<String>,
) -> ThreadQuery {
    let listing = |commentable_ids: Option<String>| ListingRequest {
        page,
        sort_key,
        commentable_ids,
        group_id: group_id.clone(),
    };
    match source {
        ThreadSource::All => ThreadQuery::All(listing(None)),
        ThreadSource::Following => ThreadQuery::Following(listing(None)),
        ThreadSource::Topic {
            commentable_ids, ..
        } => ThreadQuery::All(listing(Some(commentable_ids.clone()))),
        ThreadSource::Search {
            text,
            commentable_ids,
        } => ThreadQuery::Search(SearchRequest {
            text: text.clone(),
            commentable_ids: commentable_ids.clone(),
            group_id: group_id.clone(),
            page,
            sort_key,
        }),
    }
}

/// Starts loading page 1 of `source`, superseding any listing in flight.
pub fn load_first_page(
    threads: &mut ThreadListState,
    seq: &mut RequestSeq,
    source: ThreadSource,
    sort_key: SortKey,
    group_id: Option<String>,
) -> UiEffect {
    let id = seq.next_id();
    threads.request.start(id);
    threads.pending = Some(source.clone());
    UiEffect::LoadThreads {
        id,
        query: query_for(&source, 1, sort_key, group_id),
        source,
        append: false,
    }
}

/// Requests the next page of the current source, if there is one.
///
/// Nothing is requested while a different source's first page is loading:
/// the page counters still belong to the list being replaced.
pub fn load_more(
    threads: &mut ThreadListState,
    seq: &mut RequestSeq,
    sort_key: SortKey,
    group_id: Option<String>,
) -> Vec<UiEffect> {
    if let Some(pending) = &threads.pending {
        debug!(?pending, "first page still loading");
        return vec![];
    }
    if !threads.has_more() {
        debug!(page = threads.page, "no further thread pages");
        return vec![];
    }
    if threads.request.is_running() {
        return vec![];
    }
    let id = seq.next_id();
    threads.request.start(id);
    vec![UiEffect::LoadThreads {
        id,
        query: query_for(&threads.source, threads.page + 1, sort_key, group_id),
        source: threads.source.clone(),
        append: true,
    }]
}

/// Applies a listing response.
///
/// Replacing the collection clears search alerts; appending a page keeps them.
/// A further page only lands on the list it was requested for.
pub fn handle_loaded(
    threads: &mut ThreadListState,
    id: RequestId,
    source: ThreadSource,
    append: bool,
    result: Result<ThreadPage, String>,
) -> Vec<StateMutation> {
    if !threads.request.finish_if_active(id) {
        debug!(request = id.0, "dropping stale thread listing");
        return vec![];
    }
    if append && source != threads.source {
        debug!(request = id.0, ?source, "dropping page for a replaced list");
        return vec![];
    }
    match result {
        Ok(page) if append => {
            threads.append(page);
            vec![]
        }
        Ok(page) => {
            threads.replace(source, page);
            threads.selected = None;
            vec![StateMutation::Search(SearchMutation::ClearAlerts)]
        }
        Err(error) => {
            warn!(%error, append, "failed to load threads");
            if !append {
                threads.pending = None;
            }
            vec![]
        }
    }
}
