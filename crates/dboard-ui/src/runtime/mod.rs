//! Board runtime - owns state, executes effects, feeds completions back.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Handlers are spawned on tokio and their `UiEvent` lands in `inbox_tx`
//! - A handler task that panics still reports in, so `settle` never hangs
//! - `next_completion` / `settle` drain the inbox through the reducer
//! - Board events are published to subscribers as the reducer emits them
//!
//! Dispatching spawns tasks, so it must happen inside a tokio runtime.

mod handlers;
mod inbox;

use std::future::Future;

use anyhow::{Context, Result};
use dboard_core::api::DiscussionClient;
use dboard_core::config::Config;
use dboard_core::context::BoardOptions;
use inbox::{CompletionReceiver, CompletionSender};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::bus::{BoardEventReceiver, EventBus};
use crate::effects::UiEffect;
use crate::events::{RouteUiEvent, UiEvent};
use crate::state::BoardState;
use crate::update;

/// One mounted discussion board.
pub struct BoardRuntime {
    pub state: BoardState,
    client: DiscussionClient,
    bus: EventBus,
    inbox_tx: CompletionSender,
    inbox_rx: CompletionReceiver,
    /// Spawned handlers whose completion has not been received yet.
    in_flight: usize,
}

impl BoardRuntime {
    pub fn new(state: BoardState, client: DiscussionClient) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state,
            client,
            bus: EventBus::default(),
            inbox_tx,
            inbox_rx,
            in_flight: 0,
        }
    }

    /// Builds the board from bootstrap options and the configured server.
    pub fn from_options(options: BoardOptions, config: &Config) -> Result<Self> {
        let state = BoardState::from_options(options).context("Invalid topic hierarchy")?;
        let client = DiscussionClient::from_config(config).context("Failed to create client")?;
        Ok(Self::new(state, client))
    }

    pub fn subscribe(&mut self) -> BoardEventReceiver {
        self.bus.subscribe()
    }

    /// Restores the board for the page's initial location.
    pub fn start(&mut self, fragment: &str) {
        self.dispatch(UiEvent::Route(RouteUiEvent::Start {
            fragment: fragment.to_string(),
        }));
    }

    /// Runs `event` through the reducer and executes the resulting effects.
    pub fn dispatch(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    pub fn pending(&self) -> usize {
        self.in_flight
    }

    /// Waits for the next spawned handler and dispatches its event.
    ///
    /// Returns false when nothing is in flight.
    pub async fn next_completion(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        let Some(completion) = self.inbox_rx.recv().await else {
            return false;
        };
        self.in_flight -= 1;
        match completion {
            Ok(event) => self.dispatch(event),
            Err(err) => warn!(%err, "effect handler did not complete"),
        }
        true
    }

    /// Processes completions until no request is in flight, including
    /// requests chained by earlier completions.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Emit(event) => {
                debug!(event = event.name(), "publish");
                self.bus.publish(&event);
            }
            UiEffect::ThreadSearch { id, request } => {
                debug!(request = id.0, text = %request.text, "thread search");
                let client = self.client.clone();
                self.spawn_effect(move || handlers::thread_search(client, id, request));
            }
            UiEffect::UserSearch { id, username } => {
                debug!(request = id.0, %username, "user search");
                let client = self.client.clone();
                self.spawn_effect(move || handlers::user_search(client, id, username));
            }
            UiEffect::LoadThreads {
                id,
                source,
                query,
                append,
            } => {
                debug!(request = id.0, append, "load threads");
                let client = self.client.clone();
                self.spawn_effect(move || {
                    handlers::load_threads(client, id, source, query, append)
                });
            }
            UiEffect::CreateThread {
                id,
                commentable_id,
                thread,
            } => {
                debug!(request = id.0, %commentable_id, "create thread");
                let client = self.client.clone();
                self.spawn_effect(move || {
                    handlers::create_thread(client, id, commentable_id, thread)
                });
            }
        }
    }

    /// Spawns a handler and routes its event back into the inbox.
    fn spawn_effect<F, Fut>(&mut self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.inbox_tx.clone();
        let handler = tokio::spawn(f());
        tokio::spawn(async move {
            // The receiver lives as long as the runtime.
            let _ = tx.send(handler.await);
        });
    }
}
