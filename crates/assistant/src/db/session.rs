//! Persisted session slot.

use std::sync::Arc;

use super::RepositoryError;
use crate::models::user::User;
use crate::storage::{KeyValueStore, keys};

/// Repository for the single persisted session record.
///
/// The slot holds at most one [`User`] at a time: the currently signed-in
/// account. `save` overwrites, `clear` empties it.
pub struct SessionRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SessionRepository {
    /// Create a repository over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted session record, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store fails.
    /// Returns `RepositoryError::DataCorruption` if the stored record is
    /// not a valid user.
    pub async fn load(&self) -> Result<Option<User>, RepositoryError> {
        match self.store.get(keys::CURRENT_USER).await? {
            Some(json) => {
                let user = serde_json::from_str(&json).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid session record: {e}"))
                })?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Persist `user` as the current session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store fails.
    pub async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(user)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        self.store.put(keys::CURRENT_USER, &json).await?;
        Ok(())
    }

    /// Remove the persisted session record.
    ///
    /// Clearing an empty slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store fails.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        self.store.remove(keys::CURRENT_USER).await?;
        Ok(())
    }
}
