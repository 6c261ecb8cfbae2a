//! The notification feed manager.
//!
//! One manager exists per dashboard "tab". Every external trigger — startup,
//! auth change, preference change, cross-tab signal — funnels into
//! [`FeedManager::resync`], which re-evaluates the whole invariant: a live
//! subscription exists iff a staff session resolves and that staff member's
//! realtime preference is enabled.
//!
//! Each resync bumps a generation counter. Async completions (the history
//! fetch, live pump deliveries) carry the generation they were started
//! under and are discarded when it no longer matches, so a slow stale fetch
//! can never overwrite a newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use bellhop_core::config::feed::FeedConfig;
use bellhop_core::traits::LocalStore;
use bellhop_entity::Notification;

use crate::preference;
use crate::session;
use crate::signal::ChangeSignal;
use crate::state::{FeedPhase, FeedState};
use crate::traits::{AlertSink, HistoryClient, LiveChannel, LiveSubscription};

/// Owns the notification feed for the signed-in staff member.
#[derive(Debug)]
pub struct FeedManager {
    /// Durable local store (token, identity, preference).
    store: Arc<dyn LocalStore>,
    /// History endpoint client.
    history: Arc<dyn HistoryClient>,
    /// Live channel factory.
    live: Arc<dyn LiveChannel>,
    /// Transient alert sink for high/critical live notifications.
    alerts: Arc<dyn AlertSink>,
    /// Feed settings.
    config: FeedConfig,
    /// Feed state. No await point ever holds this lock.
    state: Arc<RwLock<FeedState>>,
    /// Monotonic resync generation; stale completions are discarded.
    generation: Arc<AtomicU64>,
    /// Live pump task for the current subscription, if any.
    pump: Mutex<Option<JoinHandle<()>>>,
    /// Change broadcast handle shared with other tabs.
    signal: ChangeSignal,
}

impl FeedManager {
    /// Creates a manager. Call [`resync`](Self::resync) to bring it up.
    pub fn new(
        store: Arc<dyn LocalStore>,
        history: Arc<dyn HistoryClient>,
        live: Arc<dyn LiveChannel>,
        alerts: Arc<dyn AlertSink>,
        config: FeedConfig,
        signal: ChangeSignal,
    ) -> Self {
        Self {
            store,
            history,
            live,
            alerts,
            config,
            state: Arc::new(RwLock::new(FeedState::new())),
            generation: Arc::new(AtomicU64::new(0)),
            pump: Mutex::new(None),
            signal,
        }
    }

    /// Snapshot of the current feed, newest first.
    pub fn items(&self) -> Vec<Notification> {
        self.read_state().items.clone()
    }

    /// Current unread count.
    pub fn unread_count(&self) -> u64 {
        self.read_state().unread_count
    }

    /// Current phase.
    pub fn phase(&self) -> FeedPhase {
        self.read_state().phase
    }

    /// Replaces the feed wholesale.
    ///
    /// Escape hatch for callers that mutate the feed externally (e.g. a
    /// mark-all-read screen); the caller is responsible for keeping the
    /// unread count consistent.
    pub fn set_items(&self, items: Vec<Notification>) {
        self.write_state().items = items;
    }

    /// Overwrites the unread count. Same escape-hatch contract as
    /// [`set_items`](Self::set_items).
    pub fn set_unread_count(&self, count: u64) {
        self.write_state().unread_count = count;
    }

    /// Re-evaluates auth and preference and rebuilds the feed.
    ///
    /// Tears down any existing live subscription first; that makes resync
    /// safe to call from any trigger at any time.
    pub async fn resync(&self) {
        let epoch = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.close_live();

        let Some(session) = session::resolve(self.store.as_ref()).await else {
            debug!("No staff session, feed disconnected");
            self.reset_if_current(FeedPhase::Disconnected, epoch);
            return;
        };
        let staff_id = session.staff_id();

        let enabled = preference::read(
            self.store.as_ref(),
            &self.config.preference_key_prefix,
            staff_id,
        )
        .await;
        if !enabled {
            debug!(%staff_id, "Realtime disabled by preference");
            self.reset_if_current(FeedPhase::DisabledByPreference, epoch);
            return;
        }

        if !self.write_state_if_current(epoch, |state| state.phase = FeedPhase::Loading) {
            return;
        }

        match self
            .history
            .recent(&session.token, self.config.history_limit)
            .await
        {
            Ok(items) => {
                let unread = items.iter().filter(|n| n.is_unread_by(staff_id)).count() as u64;
                let count = items.len();
                let applied = self.write_state_if_current(epoch, |state| {
                    state.items = items;
                    state.unread_count = unread;
                });
                if !applied {
                    debug!("Discarding stale history response");
                    return;
                }
                info!(count, unread, "Notification history loaded");
            }
            Err(e) => {
                // Soft failure: keep whatever the feed held before.
                warn!(error = %e, "Failed to load notification history");
            }
        }

        if self.generation.load(Ordering::SeqCst) != epoch {
            return;
        }

        match self.live.subscribe(&session.token).await {
            Ok(subscription) => {
                if self.install_pump(subscription, epoch) {
                    self.write_state_if_current(epoch, |state| state.phase = FeedPhase::Live);
                } else {
                    debug!("Discarding stale live subscription");
                }
            }
            Err(e) => {
                warn!(error = %e, "Live channel subscribe failed, feed may go stale");
            }
        }
    }

    /// Toggles the realtime preference for the signed-in staff member and
    /// broadcasts the change for other tabs.
    ///
    /// Silent no-op when no staff identity resolves. Turning off tears the
    /// subscription down and clears the feed synchronously, with no network
    /// round-trip; turning on re-enters the setup transition.
    pub async fn set_realtime_enabled(&self, enabled: bool) {
        let Some(session) = session::resolve(self.store.as_ref()).await else {
            debug!("Preference toggle ignored, no staff session");
            return;
        };

        if let Err(e) = preference::write(
            self.store.as_ref(),
            &self.config.preference_key_prefix,
            session.staff_id(),
            enabled,
        )
        .await
        {
            warn!(error = %e, "Failed to persist realtime preference");
        }

        if enabled {
            self.resync().await;
        } else {
            // Invalidate in-flight work before clearing so a slow fetch
            // started under the old generation cannot resurrect the feed.
            let epoch = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            self.close_live();
            self.reset_if_current(FeedPhase::DisabledByPreference, epoch);
        }

        self.signal.notify();
    }

    /// Spawns a background task that resyncs whenever another handle on the
    /// change channel (another tab) broadcasts.
    pub fn spawn_change_listener(self: &Arc<Self>) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        let mut listener = self.signal.subscribe();
        tokio::spawn(async move {
            while listener.changed().await {
                debug!("Change signal received, resyncing feed");
                manager.resync().await;
            }
        })
    }

    /// Tears down the live subscription and invalidates in-flight work,
    /// leaving the feed contents as they are.
    pub fn shutdown(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.close_live();
    }

    /// Spawns the pump for a freshly opened subscription and installs it,
    /// unless the generation moved past `epoch` while the subscribe was in
    /// flight. Returns whether the subscription was installed; a stale one
    /// is dropped here, closing the channel behind it, and never touches
    /// the pump a newer resync owns.
    fn install_pump(&self, mut subscription: LiveSubscription, epoch: u64) -> bool {
        let mut slot = self.lock_pump();
        if self.generation.load(Ordering::SeqCst) != epoch {
            return false;
        }

        let state = Arc::clone(&self.state);
        let generation = Arc::clone(&self.generation);
        let alerts = Arc::clone(&self.alerts);
        let handle = tokio::spawn(async move {
            while let Some(notification) = subscription.next().await {
                let delivered = {
                    let mut state = state.write().unwrap_or_else(|e| e.into_inner());
                    if generation.load(Ordering::SeqCst) != epoch {
                        false
                    } else {
                        state.items.insert(0, notification.clone());
                        state.unread_count += 1;
                        true
                    }
                };
                if !delivered {
                    break;
                }
                if notification.severity.should_alert() {
                    alerts.alert(&notification);
                }
            }
        });

        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
        true
    }

    /// Idempotent teardown of the live pump.
    fn close_live(&self) {
        if let Some(task) = self.lock_pump().take() {
            task.abort();
        }
    }

    fn reset_if_current(&self, phase: FeedPhase, epoch: u64) {
        self.write_state_if_current(epoch, |state| state.reset(phase));
    }

    /// Runs `apply` under the state write lock, unless the generation moved
    /// past `epoch`. Checking inside the lock is what makes the guard
    /// airtight: an invalidating caller bumps the generation before taking
    /// this lock, so either the bump is visible to the stale writer here,
    /// or the invalidator's reset lands after the stale write and wins.
    fn write_state_if_current(&self, epoch: u64, apply: impl FnOnce(&mut FeedState)) -> bool {
        let mut state = self.write_state();
        if self.generation.load(Ordering::SeqCst) != epoch {
            return false;
        }
        apply(&mut state);
        true
    }

    fn read_state(&self) -> RwLockReadGuard<'_, FeedState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, FeedState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_pump(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pump.lock().unwrap_or_else(|e| e.into_inner())
    }
}
