//! Inbox channel types.

use tokio::sync::mpsc;
use tokio::task::JoinError;

use crate::events::UiEvent;

/// A handler's event, or why its task ended without one.
pub type Completion = Result<UiEvent, JoinError>;

pub type CompletionSender = mpsc::UnboundedSender<Completion>;
pub type CompletionReceiver = mpsc::UnboundedReceiver<Completion>;
