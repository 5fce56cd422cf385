//! Board state.
//!
//! One `BoardState` per mounted board. Feature slices own their own state;
//! cross-slice changes go through `StateMutation` in the reducer.

use dboard_core::api::ThreadPage;
use dboard_core::context::{BoardContext, BoardOptions};
use dboard_core::topics::{MalformedHierarchyError, TopicTree};

use crate::common::RequestSeq;
use crate::features::composer::ComposerState;
use crate::features::search::SearchState;
use crate::features::threads::ThreadListState;
use crate::features::topics::TopicsState;
use crate::router::NavigationRouter;

/// Which main panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Board,
    NewPost,
}

#[derive(Debug)]
pub struct BoardState {
    pub ctx: BoardContext,
    pub tree: TopicTree,
    pub topics: TopicsState,
    pub search: SearchState,
    pub threads: ThreadListState,
    pub composer: ComposerState,
    pub panel: Panel,
    pub router: NavigationRouter,
    pub seq: RequestSeq,
}

impl BoardState {
    /// Builds the board for `ctx`, with `initial` as the unfiltered listing.
    pub fn new(ctx: BoardContext, initial: ThreadPage) -> Result<Self, MalformedHierarchyError> {
        let tree = TopicTree::from_category_map(&ctx.course_settings.category_map)?;
        Ok(Self {
            topics: TopicsState::new(&tree),
            tree,
            search: SearchState::default(),
            threads: ThreadListState::new(initial),
            composer: ComposerState::default(),
            panel: Panel::Board,
            router: NavigationRouter::default(),
            seq: RequestSeq::default(),
            ctx,
        })
    }

    pub fn from_options(options: BoardOptions) -> Result<Self, MalformedHierarchyError> {
        let (ctx, initial) = options.into_parts();
        Self::new(ctx, initial)
    }

    /// Cohort to scope requests to, if the user may choose one.
    pub fn group_scope(&self) -> Option<String> {
        if self.ctx.can_select_group() {
            self.topics.group_id.clone()
        } else {
            None
        }
    }
}
