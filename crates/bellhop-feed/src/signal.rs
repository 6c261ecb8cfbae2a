//! Payload-free change broadcast shared by feed consumers in a process.
//!
//! The browser original used storage events plus a same-tab custom event;
//! here every open "tab" holds a [`ChangeSignal`] handle on one broadcast
//! channel. Events carry only the origin tag of the sending handle so a
//! handle can skip its own broadcasts. Receivers re-read authoritative
//! state from the local store; event contents are never trusted.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::broadcast;

static NEXT_ORIGIN: AtomicU64 = AtomicU64::new(1);

fn next_origin() -> u64 {
    NEXT_ORIGIN.fetch_add(1, Ordering::Relaxed)
}

/// One handle on the shared change channel.
#[derive(Debug)]
pub struct ChangeSignal {
    origin: u64,
    sender: broadcast::Sender<u64>,
}

impl ChangeSignal {
    /// Creates a fresh channel with this as its first handle.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(16);
        Self {
            origin: next_origin(),
            sender,
        }
    }

    /// Creates another handle on the same channel with its own origin tag.
    pub fn handle(&self) -> Self {
        Self {
            origin: next_origin(),
            sender: self.sender.clone(),
        }
    }

    /// Broadcasts a change. Fine to call with no listeners.
    pub fn notify(&self) {
        let _ = self.sender.send(self.origin);
    }

    /// Subscribes to broadcasts from other handles.
    pub fn subscribe(&self) -> ChangeListener {
        ChangeListener {
            origin: self.origin,
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for ChangeSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Receives change broadcasts from other handles on the same channel.
#[derive(Debug)]
pub struct ChangeListener {
    origin: u64,
    receiver: broadcast::Receiver<u64>,
}

impl ChangeListener {
    /// Waits for a change broadcast from another handle. Returns `false`
    /// once every sending handle is gone. A lagged receiver collapses the
    /// missed events into one.
    pub async fn changed(&mut self) -> bool {
        loop {
            match self.receiver.recv().await {
                Ok(origin) if origin != self.origin => return true,
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(_)) => return true,
                Err(broadcast::error::RecvError::Closed) => return false,
            }
        }
    }
}
