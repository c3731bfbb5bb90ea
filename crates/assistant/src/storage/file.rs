//! JSON file-backed key-value store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KeyValueStore, StorageError};

/// Durable key-value store backed by a single JSON file.
///
/// The whole store is one JSON object (`key -> value`). It is loaded once
/// when the store is opened; every write updates the in-memory map and
/// rewrites the file before returning. Rewrites go through a temp file
/// and a rename, so the file on disk is always a complete store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading existing contents if the file
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read,
    /// or `StorageError::Serialization` if it is not a valid JSON object.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the backing file from the given snapshot.
    async fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(entries)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // Write to temp file first, then rename into place
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, json).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        self.persist(&entries).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_open_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("store.json"))
            .await
            .unwrap();
        assert_eq!(store.get("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        store
            .put("auth.current_user", r#"{"id":"user-1"}"#)
            .await
            .unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("auth.current_user").await.unwrap(),
            Some(r#"{"id":"user-1"}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_remove_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        store.put("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_round_trip_byte_for_byte() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        // Raw value strings come back exactly as stored, including
        // whitespace and key order inside the value
        let value = r#"{"b": 1,  "a": 2}"#;

        let store = JsonFileStore::open(&path).await.unwrap();
        store.put("k", value).await.unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("k").await.unwrap(), Some(value.to_string()));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        tokio::fs::write(&path, "not json at all").await.unwrap();

        let result = JsonFileStore::open(&path).await;
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
