//! Durable local key/value store port.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for durable client-side key/value storage.
///
/// This is the desktop analog of browser `localStorage`: a flat string
/// keyspace holding the staff token, the staff user record, and per-staff
/// preference flags. All values are plain strings; structured values are
/// stored as JSON.
#[async_trait]
pub trait LocalStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, overwriting any previous one.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;
}
