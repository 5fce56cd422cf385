//! New-post composer.

mod state;
mod update;

pub use state::{ComposerError, ComposerState};
pub use update::{handle_created, submit};
