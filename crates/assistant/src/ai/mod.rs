//! Client for the external AI services.
//!
//! Two upstream flows are consumed, both plain request/response HTTP:
//! answer generation for plan questions and signal-strength prediction.
//! Services depend on the [`AiApi`] port; [`AiClient`] is the production
//! implementation, test suites inject scripted doubles.

mod client;
mod error;
pub mod types;

pub use client::AiClient;
pub use error::AiError;

use async_trait::async_trait;

use crate::models::prediction::CarrierPrediction;

/// Port for the external AI services.
#[async_trait]
pub trait AiApi: Send + Sync {
    /// Ask the answer service a mobile-plan question.
    ///
    /// # Errors
    ///
    /// Returns `AiError` if the request fails or the response is invalid.
    async fn answer_question(&self, question: &str) -> Result<String, AiError>;

    /// Ask the prediction service for carrier signal quality at a location.
    ///
    /// # Errors
    ///
    /// Returns `AiError` if the request fails or the response is invalid.
    async fn predict_signal(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<CarrierPrediction>, AiError>;
}
