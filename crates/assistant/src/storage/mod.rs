//! Pluggable key-value storage.
//!
//! The assistant persists authentication state through a small key-value
//! port so the backing store can be swapped: in-memory for tests, a JSON
//! file on disk in production. Values are raw JSON strings; typed access
//! lives in the repositories (`crate::db`).

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

/// Storage keys for persisted authentication data.
pub mod keys {
    /// Key for the current logged-in user record.
    pub const CURRENT_USER: &str = "auth.current_user";

    /// Key for the registered-credentials map (email -> credential record).
    pub const CREDENTIALS: &str = "auth.credentials";
}

/// Errors that can occur in key-value storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("IO error: {0}")]
    Io(String),

    /// Stored data could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Port for durable key-value storage.
///
/// Implementations store raw JSON strings so persisted data round-trips
/// exactly. All methods take `&self`; implementations handle their own
/// synchronization.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`.
    ///
    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
