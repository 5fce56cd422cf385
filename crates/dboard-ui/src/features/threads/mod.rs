//! Thread list feature.

mod state;
mod update;

pub use state::{ThreadListState, ThreadSource};
pub use update::{handle_loaded, load_first_page, load_more, query_for};
