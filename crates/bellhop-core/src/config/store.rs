//! Durable local store configuration.

use serde::{Deserialize, Serialize};

/// Settings for the JSON-file-backed local key/value store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON file holding the key/value pairs.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> String {
    "data/local-store.json".to_string()
}
