//! Application state shared across callers.

use std::sync::Arc;

use crate::ai::{AiApi, AiClient};
use crate::config::AssistantConfig;
use crate::db::ChatHistory;
use crate::services::{AuthService, ConversationService, SignalService};
use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};

/// Application state shared across all callers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the three services, which all share one storage
/// backend and one AI client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AssistantConfig,
    auth: AuthService,
    conversation: ConversationService,
    signal: SignalService,
}

impl AppState {
    /// Create the application state from configuration.
    ///
    /// Opens the JSON file store when a storage path is configured,
    /// otherwise keeps auth state in memory, and builds the HTTP AI
    /// client.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the configured store file exists but
    /// cannot be loaded.
    pub async fn new(config: AssistantConfig) -> Result<Self, StorageError> {
        let store: Arc<dyn KeyValueStore> = match &config.storage_path {
            Some(path) => Arc::new(JsonFileStore::open(path.clone()).await?),
            None => Arc::new(MemoryStore::new()),
        };
        let ai: Arc<dyn AiApi> = Arc::new(AiClient::new(&config.ai));

        Ok(Self::with_parts(config, store, ai))
    }

    /// Create the application state from explicit parts.
    ///
    /// Used by tests to inject an in-memory store and scripted AI doubles.
    #[must_use]
    pub fn with_parts(
        config: AssistantConfig,
        store: Arc<dyn KeyValueStore>,
        ai: Arc<dyn AiApi>,
    ) -> Self {
        let auth = AuthService::new(store);
        let conversation = ConversationService::new(Arc::new(ChatHistory::new()), Arc::clone(&ai));
        let signal = SignalService::new(ai);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                auth,
                conversation,
                signal,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &AssistantConfig {
        &self.inner.config
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// Get a reference to the conversation service.
    #[must_use]
    pub fn conversation(&self) -> &ConversationService {
        &self.inner.conversation
    }

    /// Get a reference to the signal prediction service.
    #[must_use]
    pub fn signal(&self) -> &SignalService {
        &self.inner.signal
    }
}
