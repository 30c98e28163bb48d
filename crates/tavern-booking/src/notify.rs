//! # Notifications
//!
//! User-facing feedback (the storefront's toasts).
//!
//! Sinks are fire-and-forget: `notify` returns nothing and must not block.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{info, warn};

/// How a notification is styled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Default,
    Destructive,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Notification {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Default)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Destructive)
    }
}

/// Accepts notifications for display.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Default => {
                info!(title = %notification.title, "{}", notification.message)
            }
            Severity::Destructive => {
                warn!(title = %notification.title, "{}", notification.message)
            }
        }
    }
}

/// Keeps notifications in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    notifications: Mutex<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    /// Most recent notification.
    pub fn last(&self) -> Option<Notification> {
        self.notifications
            .lock()
            .ok()
            .and_then(|n| n.last().cloned())
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, notification: Notification) {
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.push(notification);
        }
    }
}

/// Discards notifications.
pub struct NoOpSink;

impl NotificationSink for NoOpSink {
    fn notify(&self, _notification: Notification) {}
}

impl<N: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        assert_eq!(sink.last(), None);

        sink.notify(Notification::info("A", "first"));
        sink.notify(Notification::error("B", "second"));

        let all = sink.notifications();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "A");
        assert_eq!(sink.last().unwrap().severity, Severity::Destructive);
    }

    #[test]
    fn test_sinks_through_arc() {
        let sink = std::sync::Arc::new(MemorySink::new());
        let shared: std::sync::Arc<dyn NotificationSink> = sink.clone();
        shared.notify(Notification::info("Hello", "world"));
        NoOpSink.notify(Notification::info("Ignored", ""));
        TracingSink.notify(Notification::info("Logged", ""));
        assert_eq!(sink.notifications().len(), 1);
    }
}
