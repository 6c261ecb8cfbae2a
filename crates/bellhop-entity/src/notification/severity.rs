//! Notification severity tiers.

use serde::{Deserialize, Serialize};

/// Priority tier of a notification.
///
/// Drives whether a transient alert is raised on live delivery: `high` and
/// `critical` alert, `info` never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Routine informational notification.
    Info,
    /// Elevated priority, shown as a transient alert.
    High,
    /// Urgent, shown as a transient alert.
    Critical,
}

impl Severity {
    /// Whether live delivery of this severity raises a transient alert.
    pub fn should_alert(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Info
    }
}
