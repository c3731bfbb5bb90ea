//! Integration test harness for Planwise.
//!
//! Cross-service flows live in `tests/*.rs`; this crate provides the
//! shared pieces: a test configuration, an [`AppState`] over an in-memory
//! store, and scripted doubles for the external AI services.
//!
//! Run with: `cargo test -p planwise-integration-tests`

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use planwise_assistant::ai::{AiApi, AiError};
use planwise_assistant::config::{AiConfig, AssistantConfig};
use planwise_assistant::models::prediction::CarrierPrediction;
use planwise_assistant::state::AppState;
use planwise_assistant::storage::{KeyValueStore, MemoryStore};

/// Install a tracing subscriber for test diagnostics.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A configuration pointing at an unreachable AI service, no file storage.
///
/// # Panics
///
/// Panics if the fixed base URL fails to parse (it cannot).
#[must_use]
pub fn test_config() -> AssistantConfig {
    AssistantConfig {
        ai: AiConfig {
            base_url: url::Url::parse("http://127.0.0.1:9").expect("static test URL"),
            api_key: None,
            timeout: Duration::from_millis(200),
        },
        storage_path: None,
    }
}

/// Build an [`AppState`] over a fresh in-memory store and the given AI
/// double.
#[must_use]
pub fn memory_state(ai: Arc<dyn AiApi>) -> AppState {
    AppState::with_parts(test_config(), Arc::new(MemoryStore::new()), ai)
}

/// Build an [`AppState`] over an explicit store and AI double.
#[must_use]
pub fn state_with_store(store: Arc<dyn KeyValueStore>, ai: Arc<dyn AiApi>) -> AppState {
    AppState::with_parts(test_config(), store, ai)
}

/// AI double with scripted responses for both flows.
pub struct ScriptedAi {
    /// Answer returned for every question.
    pub answer: String,
    /// Predictions returned for every location.
    pub predictions: Vec<CarrierPrediction>,
}

impl ScriptedAi {
    /// Double that answers every question with `answer` and predicts
    /// nothing.
    #[must_use]
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            predictions: Vec::new(),
        }
    }

    /// Double that returns `predictions` for every location.
    #[must_use]
    pub fn predicting(predictions: Vec<CarrierPrediction>) -> Self {
        Self {
            answer: String::new(),
            predictions,
        }
    }
}

#[async_trait]
impl AiApi for ScriptedAi {
    async fn answer_question(&self, _question: &str) -> Result<String, AiError> {
        Ok(self.answer.clone())
    }

    async fn predict_signal(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<Vec<CarrierPrediction>, AiError> {
        Ok(self.predictions.clone())
    }
}

/// AI double whose flows always fail.
pub struct UnavailableAi;

#[async_trait]
impl AiApi for UnavailableAi {
    async fn answer_question(&self, _question: &str) -> Result<String, AiError> {
        Err(AiError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }

    async fn predict_signal(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<Vec<CarrierPrediction>, AiError> {
        Err(AiError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }
}
