//! Shared fakes and builders for the feed integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;
use uuid::Uuid;

use bellhop_core::config::feed::FeedConfig;
use bellhop_core::error::AppError;
use bellhop_core::result::AppResult;
use bellhop_core::traits::LocalStore;
use bellhop_entity::{Notification, Severity};
use bellhop_feed::traits::{AlertSink, HistoryClient, LiveChannel, LiveSubscription};
use bellhop_feed::{ChangeSignal, FeedManager};
use bellhop_transport::MemoryStore;

pub use bellhop_core::traits::LocalStore as _;
pub use bellhop_feed::session::{STAFF_TOKEN_KEY, STAFF_USER_KEY};

/// Builds a notification with the given title, severity and acknowledgers.
pub fn notification(title: &str, severity: Severity, read_by: &[Uuid]) -> Notification {
    Notification {
        id: Uuid::new_v4(),
        title: title.to_string(),
        message: None,
        severity,
        created_at: Utc::now(),
        read_by: read_by.iter().copied().collect(),
    }
}

/// Signs a staff member in by seeding the local store.
pub async fn sign_in(store: &dyn LocalStore, staff_id: Uuid) {
    store.set(STAFF_TOKEN_KEY, "tok-test").await.unwrap();
    let record = serde_json::json!({ "id": staff_id, "name": "Test Staff" });
    store
        .set(STAFF_USER_KEY, &record.to_string())
        .await
        .unwrap();
}

/// Polls a condition for up to a second.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 1s");
}

/// History fake serving scripted responses, with an optional artificial
/// delay and a call counter.
#[derive(Debug, Default)]
pub struct ScriptedHistory {
    responses: Mutex<VecDeque<AppResult<Vec<Notification>>>>,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl ScriptedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, items: Vec<Notification>) {
        self.responses.lock().unwrap().push_back(Ok(items));
    }

    pub fn push_err(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(AppError::external_service(message)));
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoryClient for ScriptedHistory {
    async fn recent(&self, _token: &str, _limit: u32) -> AppResult<Vec<Notification>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Live channel fake; tests push notifications through the handle of the
/// most recently opened subscription.
#[derive(Debug, Default)]
pub struct FakeLive {
    connects: AtomicUsize,
    connect_delay: Mutex<Option<Duration>>,
    senders: Mutex<Vec<mpsc::Sender<Notification>>>,
}

impl FakeLive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Makes subsequent subscribes stall for the given duration.
    pub fn set_connect_delay(&self, delay: Duration) {
        *self.connect_delay.lock().unwrap() = Some(delay);
    }

    pub fn clear_connect_delay(&self) {
        *self.connect_delay.lock().unwrap() = None;
    }

    /// Pushes a live notification into the current subscription.
    pub async fn push(&self, notification: Notification) {
        let sender = self
            .senders
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no live subscription open");
        sender.send(notification).await.expect("subscription closed");
    }

    /// Pushes a live notification through every subscription ever opened,
    /// ignoring ones that are already closed.
    pub async fn push_all(&self, notification: Notification) {
        let senders: Vec<_> = self.senders.lock().unwrap().clone();
        for sender in senders {
            let _ = sender.send(notification.clone()).await;
        }
    }

    /// Whether the newest subscription is still being consumed.
    pub fn is_open(&self) -> bool {
        self.senders
            .lock()
            .unwrap()
            .last()
            .map(|sender| !sender.is_closed())
            .unwrap_or(false)
    }
}

#[async_trait]
impl LiveChannel for FakeLive {
    async fn subscribe(&self, _token: &str) -> AppResult<LiveSubscription> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        let delay = *self.connect_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let (tx, rx) = mpsc::channel(16);
        self.senders.lock().unwrap().push(tx);
        Ok(LiveSubscription::detached(rx))
    }
}

/// Alert sink that records every alert raised.
#[derive(Debug, Default)]
pub struct RecordingAlerts {
    alerts: Mutex<Vec<Notification>>,
}

impl RecordingAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.alerts.lock().unwrap().len()
    }
}

impl AlertSink for RecordingAlerts {
    fn alert(&self, notification: &Notification) {
        self.alerts.lock().unwrap().push(notification.clone());
    }
}

/// A feed manager wired to fakes, plus handles on the fakes.
pub struct TestFeed {
    pub store: Arc<MemoryStore>,
    pub history: Arc<ScriptedHistory>,
    pub live: Arc<FakeLive>,
    pub alerts: Arc<RecordingAlerts>,
    pub manager: Arc<FeedManager>,
}

impl TestFeed {
    pub fn new() -> Self {
        Self::with_parts(Arc::new(MemoryStore::new()), ChangeSignal::new())
    }

    /// Builds a feed on a shared store and change channel, simulating a
    /// second tab of the same browser.
    pub fn with_parts(store: Arc<MemoryStore>, signal: ChangeSignal) -> Self {
        let history = Arc::new(ScriptedHistory::new());
        let live = Arc::new(FakeLive::new());
        let alerts = Arc::new(RecordingAlerts::new());

        let manager = Arc::new(FeedManager::new(
            store.clone(),
            history.clone(),
            live.clone(),
            alerts.clone(),
            FeedConfig::default(),
            signal,
        ));

        Self {
            store,
            history,
            live,
            alerts,
            manager,
        }
    }
}
