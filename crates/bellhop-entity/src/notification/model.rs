//! Notification entity model.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::severity::Severity;

/// A notification as served by the admin backend.
///
/// Server-owned and read-only to the client; the wire format is camelCase
/// JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// Short title, always present.
    pub title: String,
    /// Optional body text.
    #[serde(default)]
    pub message: Option<String>,
    /// Priority tier.
    #[serde(default)]
    pub severity: Severity,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// Staff ids that have acknowledged this notification.
    #[serde(default)]
    pub read_by: HashSet<Uuid>,
}

impl Notification {
    /// Whether the given staff member has not yet acknowledged this
    /// notification.
    pub fn is_unread_by(&self, staff_id: Uuid) -> bool {
        !self.read_by.contains(&staff_id)
    }
}

/// Response envelope of the history endpoint
/// (`GET <base>/admin/notifications?limit=N`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Whether the backend considers the request successful.
    pub success: bool,
    /// Recent notifications, newest first.
    #[serde(default)]
    pub items: Vec<Notification>,
}
