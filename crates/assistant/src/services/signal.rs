//! Carrier signal prediction service.

use std::sync::Arc;

use tracing::{instrument, warn};

use crate::ai::AiApi;
use crate::models::prediction::CarrierPrediction;

/// Signal prediction service.
///
/// Delegates to the AI prediction flow and substitutes a fixed fallback
/// dataset when it fails, so callers always get a plausible result.
pub struct SignalService {
    ai: Arc<dyn AiApi>,
}

impl SignalService {
    /// Create a signal prediction service.
    #[must_use]
    pub fn new(ai: Arc<dyn AiApi>) -> Self {
        Self { ai }
    }

    /// Predict carrier signal quality at a location.
    ///
    /// Never fails: on success the service's ordered result is returned
    /// unchanged; on any error a warning is logged and the fixed fallback
    /// dataset is returned instead.
    #[instrument(skip(self))]
    pub async fn predict(&self, latitude: f64, longitude: f64) -> Vec<CarrierPrediction> {
        match self.ai.predict_signal(latitude, longitude).await {
            Ok(predictions) => predictions,
            Err(e) => {
                warn!(error = %e, "prediction flow failed, using fallback dataset");
                fallback_predictions()
            }
        }
    }
}

/// The fixed fallback dataset, one entry per carrier.
fn fallback_predictions() -> Vec<CarrierPrediction> {
    vec![
        CarrierPrediction {
            operator: "Jio".to_string(),
            rating: 4.0,
            download_speed: 25.5,
            upload_speed: 8.2,
        },
        CarrierPrediction {
            operator: "Airtel".to_string(),
            rating: 4.5,
            download_speed: 32.8,
            upload_speed: 10.5,
        },
        CarrierPrediction {
            operator: "Vi".to_string(),
            rating: 3.5,
            download_speed: 18.3,
            upload_speed: 6.8,
        },
        CarrierPrediction {
            operator: "BSNL".to_string(),
            rating: 3.0,
            download_speed: 12.5,
            upload_speed: 4.2,
        },
    ]
}
