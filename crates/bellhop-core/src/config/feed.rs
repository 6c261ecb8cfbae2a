//! Notification feed configuration.

use serde::{Deserialize, Serialize};

/// Settings for the notification feed manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Number of notifications fetched when (re)loading history.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
    /// Key prefix for the per-staff realtime preference in the local store.
    /// The full key is `<prefix>:<staff_id>`.
    #[serde(default = "default_preference_prefix")]
    pub preference_key_prefix: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            preference_key_prefix: default_preference_prefix(),
        }
    }
}

fn default_history_limit() -> u32 {
    50
}

fn default_preference_prefix() -> String {
    "bellhop:realtime".to_string()
}
