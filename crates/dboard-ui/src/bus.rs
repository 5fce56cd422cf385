//! Per-board event bus.
//!
//! Each board instance owns one bus. Subscribers receive every event published
//! after they subscribed, in publication order. Dropped receivers are pruned on
//! the next publish.

use dboard_core::topics::TopicNode;
use tokio::sync::mpsc;

use crate::features::search::SearchAlert;
use crate::state::Panel;

/// What was selected in the navigation sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectedTopic {
    All,
    Following,
    Topic(TopicNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    TopicSelected(SelectedTopic),
    ThreadSelected { thread_id: String },
    /// Full alert list after a change, in insertion order.
    AlertsChanged(Vec<SearchAlert>),
    SearchCompleted { text: String, results_count: usize },
    PanelChanged(Panel),
    LocationChanged { fragment: String },
}

impl BoardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BoardEvent::TopicSelected(_) => "topic:selected",
            BoardEvent::ThreadSelected { .. } => "thread:selected",
            BoardEvent::AlertsChanged(_) => "search:alerts-changed",
            BoardEvent::SearchCompleted { .. } => "search:completed",
            BoardEvent::PanelChanged(_) => "panel:changed",
            BoardEvent::LocationChanged { .. } => "location:changed",
        }
    }
}

pub type BoardEventReceiver = mpsc::UnboundedReceiver<BoardEvent>;

#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<mpsc::UnboundedSender<BoardEvent>>,
}

impl EventBus {
    pub fn subscribe(&mut self) -> BoardEventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, event: &BoardEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_see_events_in_order() {
        let mut bus = EventBus::default();
        let mut rx = bus.subscribe();
        bus.publish(&BoardEvent::ThreadSelected {
            thread_id: "t1".to_string(),
        });
        bus.publish(&BoardEvent::PanelChanged(Panel::NewPost));

        assert_eq!(rx.try_recv().unwrap().name(), "thread:selected");
        assert_eq!(
            rx.try_recv().unwrap(),
            BoardEvent::PanelChanged(Panel::NewPost)
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut bus = EventBus::default();
        let rx = bus.subscribe();
        let _kept = bus.subscribe();
        drop(rx);
        bus.publish(&BoardEvent::AlertsChanged(Vec::new()));
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_buses_are_independent() {
        let mut first = EventBus::default();
        let mut second = EventBus::default();
        let mut rx = second.subscribe();
        first.publish(&BoardEvent::LocationChanged {
            fragment: "following".to_string(),
        });
        assert!(rx.try_recv().is_err());
    }
}
