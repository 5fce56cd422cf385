//! Effect handlers for the board runtime.
//!
//! Handlers are pure async functions that return `UiEvent`. The runtime uses
//! `spawn_effect` to spawn them and send results to the inbox. They never
//! touch board state; errors are reported as strings inside the event.

pub mod composer;
pub mod search;
pub mod threads;

pub use composer::*;
pub use search::*;
pub use threads::*;
