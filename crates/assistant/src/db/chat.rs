//! In-process chat history store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use planwise_core::UserId;

use crate::models::chat::ChatMessage;

/// Per-user conversation log.
///
/// History is in-process and non-persistent: it grows append-only for the
/// process lifetime and insertion order is the canonical order. A user's
/// slot is allocated on first append.
#[derive(Debug, Default)]
pub struct ChatHistory {
    messages: RwLock<HashMap<UserId, Vec<ChatMessage>>>,
    guards: RwLock<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl ChatHistory {
    /// Create an empty history store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the user's history.
    pub async fn append(&self, user_id: &UserId, message: ChatMessage) {
        self.messages
            .write()
            .await
            .entry(user_id.clone())
            .or_default()
            .push(message);
    }

    /// Ordered messages for the user; empty for unknown users.
    pub async fn messages(&self, user_id: &UserId) -> Vec<ChatMessage> {
        self.messages
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Acquire the per-user exchange lock.
    ///
    /// Holding the guard serializes a whole ask exchange (user append,
    /// AI call, assistant append) against other exchanges for the same
    /// user id. Exchanges for different users proceed in parallel.
    pub async fn user_guard(&self, user_id: &UserId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut guards = self.guards.write().await;
            Arc::clone(guards.entry(user_id.clone()).or_default())
        };
        lock.lock_owned().await
    }
}
