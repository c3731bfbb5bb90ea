//! Credential repository over the key-value store.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use planwise_core::{Email, UserId};

use super::RepositoryError;
use crate::storage::{KeyValueStore, keys};

/// A stored credential entry for one account.
///
/// The password is stored as an argon2id PHC string, never in plaintext.
/// Entries are created on signup and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// Argon2id hash of the account password (PHC string format).
    pub password_hash: String,
    /// ID of the account this credential belongs to.
    pub user_id: UserId,
}

/// Repository for the email -> credential map.
///
/// The whole map is serialized as one JSON object under a single storage
/// key and written through on every insert. Inserts are serialized by an
/// internal mutex so signup's check-then-insert is atomic.
pub struct CredentialRepository {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl CredentialRepository {
    /// Create a repository over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Look up the credential entry for an email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store fails.
    /// Returns `RepositoryError::DataCorruption` if the stored map is invalid.
    pub async fn find(&self, email: &Email) -> Result<Option<CredentialRecord>, RepositoryError> {
        let mut map = self.load().await?;
        Ok(map.remove(email.as_str()))
    }

    /// Insert a credential entry for a new email.
    ///
    /// The read-check-write sequence runs under an internal lock, so two
    /// concurrent signups for the same email cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already has an entry.
    /// Returns `RepositoryError::Storage` if the store fails.
    pub async fn insert_new(
        &self,
        email: &Email,
        record: CredentialRecord,
    ) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;

        let mut map = self.load().await?;
        if map.contains_key(email.as_str()) {
            return Err(RepositoryError::Conflict(format!(
                "email already registered: {email}"
            )));
        }

        map.insert(email.as_str().to_owned(), record);
        let json = serde_json::to_string(&map)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        self.store.put(keys::CREDENTIALS, &json).await?;

        Ok(())
    }

    /// Load the full credential map from storage.
    async fn load(&self) -> Result<HashMap<String, CredentialRecord>, RepositoryError> {
        match self.store.get(keys::CREDENTIALS).await? {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid credential map: {e}"))
            }),
            None => Ok(HashMap::new()),
        }
    }
}
