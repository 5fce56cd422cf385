//! Discussion board state machine.
//!
//! Topic navigation, thread search with spelling-correction and username
//! fallback alerts, thread listings, the new-post composer and location
//! routing, driven Elm-style: events go through a pure reducer that returns
//! effects, and [`BoardRuntime`] executes them against the course server.

pub mod bus;
pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod router;
pub mod runtime;
pub mod state;
pub mod update;

pub use bus::{BoardEvent, BoardEventReceiver, EventBus, SelectedTopic};
pub use events::UiEvent;
pub use router::{NavigationRouter, Route, RouteError};
pub use runtime::BoardRuntime;
pub use state::{BoardState, Panel};
pub use update::update;
