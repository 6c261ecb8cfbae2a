//! Backend API and live-channel configuration.

use serde::{Deserialize, Serialize};

/// Settings for the admin REST API and its live channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the admin backend, e.g. `http://localhost:4000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Initial live-channel reconnect delay in milliseconds.
    #[serde(default = "default_reconnect_initial")]
    pub reconnect_initial_ms: u64,
    /// Maximum live-channel reconnect delay in milliseconds.
    #[serde(default = "default_reconnect_max")]
    pub reconnect_max_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            reconnect_initial_ms: default_reconnect_initial(),
            reconnect_max_ms: default_reconnect_max(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

fn default_reconnect_initial() -> u64 {
    1_000
}

fn default_reconnect_max() -> u64 {
    30_000
}
