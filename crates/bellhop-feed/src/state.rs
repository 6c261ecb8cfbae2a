//! Feed state and the named phases of the setup machine.

use bellhop_entity::Notification;

/// The phase the feed manager is in, re-evaluated on every resync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// No staff token or identity present.
    Disconnected,
    /// Signed in, but the staff member opted out of realtime updates.
    DisabledByPreference,
    /// History fetch in flight.
    Loading,
    /// History loaded and live subscription open.
    Live,
}

/// The feed owned by the manager: ordered notifications plus unread count.
///
/// `items` is newest first, seeded wholesale from history and grown by live
/// prepends without eviction. `unread_count` is derived once at load and
/// incremented per live push; there is no decrement path.
#[derive(Debug, Clone)]
pub struct FeedState {
    /// Current phase.
    pub phase: FeedPhase,
    /// Notifications, newest first.
    pub items: Vec<Notification>,
    /// Number of notifications not acknowledged by the current staff member.
    pub unread_count: u64,
}

impl FeedState {
    /// An empty, disconnected feed.
    pub fn new() -> Self {
        Self {
            phase: FeedPhase::Disconnected,
            items: Vec::new(),
            unread_count: 0,
        }
    }

    /// Empties the feed and moves to the given phase.
    pub fn reset(&mut self, phase: FeedPhase) {
        self.phase = phase;
        self.items.clear();
        self.unread_count = 0;
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}
