//! JSON-file-backed local store.
//!
//! The desktop analog of browser `localStorage`: one flat JSON object on
//! disk, rewritten in full on every mutation. Mutations hold the entry
//! lock across the write so concurrent writers serialize.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use bellhop_core::error::AppError;
use bellhop_core::result::AppResult;
use bellhop_core::traits::LocalStore;

/// Durable key/value store persisted as a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store, creating parent directories and loading any
    /// existing contents.
    pub async fn open(path: impl AsRef<std::path::Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::storage(format!("Corrupt store file {}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        let raw = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl LocalStore for JsonFileStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        if entries.remove(key).is_some() {
            self.persist(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_path() -> PathBuf {
        std::env::temp_dir().join(format!("bellhop-store-{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let path = temp_store_path();

        let store = JsonFileStore::open(&path).await.unwrap();
        store.set("staffUserToken", "tok-42").await.unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("staffUserToken").await.unwrap(),
            Some("tok-42".to_string())
        );

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let path = temp_store_path();
        let store = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(store.get("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_persists() {
        let path = temp_store_path();

        let store = JsonFileStore::open(&path).await.unwrap();
        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("k").await.unwrap(), None);

        let _ = tokio::fs::remove_file(&path).await;
    }
}
