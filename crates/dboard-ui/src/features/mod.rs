pub mod composer;
pub mod search;
pub mod threads;
pub mod topics;
