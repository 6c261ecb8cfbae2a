//! Alert sink that logs transient alerts.

use tracing::warn;

use bellhop_entity::Notification;
use bellhop_feed::traits::AlertSink;

/// Headless alert sink: one warn-level log line per alert, the terminal
/// analog of an auto-dismissing toast.
#[derive(Debug, Default, Clone)]
pub struct LogAlertSink;

impl LogAlertSink {
    /// Creates the sink.
    pub fn new() -> Self {
        Self
    }
}

impl AlertSink for LogAlertSink {
    fn alert(&self, notification: &Notification) {
        warn!(
            id = %notification.id,
            severity = ?notification.severity,
            title = %notification.title,
            "Notification alert"
        );
    }
}
