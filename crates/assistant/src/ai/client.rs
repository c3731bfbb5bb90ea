//! HTTP client for the AI answer and signal-prediction flows.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::AiConfig;
use crate::models::prediction::CarrierPrediction;

use super::error::{AiError, ApiErrorResponse};
use super::types::{AnswerRequest, AnswerResponse, PredictRequest, PredictResponse};

/// Path of the answer flow.
const ANSWER_PATH: &str = "v1/answer";

/// Path of the signal-prediction flow.
const PREDICT_PATH: &str = "v1/predict-signal";

/// AI service client.
///
/// Wraps a `reqwest::Client` built once with default headers and the
/// configured request timeout.
#[derive(Clone)]
pub struct AiClient {
    inner: Arc<AiClientInner>,
}

struct AiClientInner {
    client: reqwest::Client,
    base_url: url::Url,
}

impl AiClient {
    /// Create a new AI service client.
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &AiConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(api_key) = &config.api_key {
            headers.insert(
                "x-api-key",
                HeaderValue::from_str(api_key.expose_secret())
                    .expect("Invalid API key for header"),
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(AiClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        }
    }

    /// Build the full URL for a flow path.
    fn endpoint(&self, path: &str) -> String {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        format!("{base}/{path}")
    }

    /// POST a JSON request and parse the JSON response.
    async fn post<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, AiError>
    where
        Req: serde::Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let response = self
            .inner
            .client
            .post(self.endpoint(path))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| AiError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(handle_error_status(status, response).await)
        }
    }
}

#[async_trait]
impl super::AiApi for AiClient {
    #[instrument(skip(self, question))]
    async fn answer_question(&self, question: &str) -> Result<String, AiError> {
        let request = AnswerRequest {
            question: question.to_owned(),
        };
        let response: AnswerResponse = self.post(ANSWER_PATH, &request).await?;
        Ok(response.answer)
    }

    #[instrument(skip(self))]
    async fn predict_signal(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<CarrierPrediction>, AiError> {
        let request = PredictRequest {
            latitude,
            longitude,
        };
        let response: PredictResponse = self.post(PREDICT_PATH, &request).await?;
        Ok(response.predictions)
    }
}

/// Handle an error status code.
async fn handle_error_status(status: reqwest::StatusCode, response: reqwest::Response) -> AiError {
    // Try to parse a structured error body, fall back to the raw text
    match response.text().await {
        Ok(body) => {
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map_or(body, |api_error| api_error.message);
            AiError::Api {
                status: status.as_u16(),
                message,
            }
        }
        Err(e) => AiError::Http(e),
    }
}
