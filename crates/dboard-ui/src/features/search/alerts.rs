//! Dismissible notices shown above search results.

use uuid::Uuid;

/// Opaque token identifying one alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertHandle(Uuid);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAlert {
    pub id: AlertHandle,
    /// May contain markup; user-provided parts are escaped by the caller.
    pub message: String,
    pub css_class: String,
    /// Insertion order index.
    pub created_at: u64,
}

/// Alerts in insertion order.
///
/// `revision` changes on every mutation so the reducer can tell whether
/// subscribers need a fresh `search:alerts-changed`.
#[derive(Debug, Default)]
pub struct SearchAlertBank {
    alerts: Vec<SearchAlert>,
    next_order: u64,
    revision: u64,
}

impl SearchAlertBank {
    pub const DEFAULT_CLASS: &'static str = "default";

    /// Adds an alert with the default style.
    pub fn add(&mut self, message: impl Into<String>) -> AlertHandle {
        self.add_with_class(message, Self::DEFAULT_CLASS)
    }

    pub fn add_with_class(
        &mut self,
        message: impl Into<String>,
        css_class_suffix: &str,
    ) -> AlertHandle {
        let id = AlertHandle(Uuid::new_v4());
        self.alerts.push(SearchAlert {
            id,
            message: message.into(),
            css_class: format!("search-alert-{css_class_suffix}"),
            created_at: self.next_order,
        });
        self.next_order += 1;
        self.revision += 1;
        id
    }

    /// Removes one alert. Unknown handles are ignored (they may have been
    /// cleared already).
    pub fn remove(&mut self, handle: AlertHandle) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != handle);
        let removed = self.alerts.len() != before;
        if removed {
            self.revision += 1;
        }
        removed
    }

    /// Removes every alert. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        if self.alerts.is_empty() {
            return false;
        }
        self.alerts.clear();
        self.revision += 1;
        true
    }

    pub fn list_in_order(&self) -> &[SearchAlert] {
        &self.alerts
    }

    pub fn messages(&self) -> Vec<&str> {
        self.alerts.iter().map(|alert| alert.message.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
