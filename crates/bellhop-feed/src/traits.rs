//! Ports consumed by the feed manager, implemented by adapter crates.

use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use bellhop_core::result::AppResult;
use bellhop_entity::Notification;

/// Trait for fetching recent notification history from the admin backend.
#[async_trait]
pub trait HistoryClient: Send + Sync + fmt::Debug + 'static {
    /// Fetches the most recent notifications, newest first.
    async fn recent(&self, token: &str, limit: u32) -> AppResult<Vec<Notification>>;
}

/// Trait for opening an authenticated live notification subscription.
///
/// Transport-level disconnects are the adapter's problem: it reconnects on
/// its own and keeps feeding the returned subscription. The manager never
/// observes reconnects and does not refetch history when they happen.
#[async_trait]
pub trait LiveChannel: Send + Sync + fmt::Debug + 'static {
    /// Opens a live subscription authenticated with the given token.
    async fn subscribe(&self, token: &str) -> AppResult<LiveSubscription>;
}

/// A handle on one open live subscription.
///
/// Dropping the handle aborts the transport task behind it, so teardown is
/// just dropping the handle. Closing twice is a no-op.
#[derive(Debug)]
pub struct LiveSubscription {
    receiver: mpsc::Receiver<Notification>,
    task: Option<JoinHandle<()>>,
}

impl LiveSubscription {
    /// Creates a subscription backed by a transport task.
    pub fn new(receiver: mpsc::Receiver<Notification>, task: JoinHandle<()>) -> Self {
        Self {
            receiver,
            task: Some(task),
        }
    }

    /// Creates a subscription whose sender is owned elsewhere (test fakes).
    pub fn detached(receiver: mpsc::Receiver<Notification>) -> Self {
        Self {
            receiver,
            task: None,
        }
    }

    /// Waits for the next live notification. Returns `None` once the
    /// transport side is gone.
    pub async fn next(&mut self) -> Option<Notification> {
        self.receiver.recv().await
    }
}

impl Drop for LiveSubscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Trait for raising transient visual alerts.
///
/// Invoked once per live notification whose severity warrants it; the sink
/// must be non-blocking and auto-dismissing (a toast, a log line).
pub trait AlertSink: Send + Sync + fmt::Debug + 'static {
    /// Raises one transient alert for the given notification.
    fn alert(&self, notification: &Notification);
}
