//! Carrier signal prediction types.

use serde::{Deserialize, Serialize};

/// Predicted network quality for one carrier at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierPrediction {
    /// Carrier name (e.g., "Airtel").
    pub operator: String,
    /// Signal quality rating from 0 to 5.
    pub rating: f32,
    /// Estimated download speed in Mbps.
    pub download_speed: f32,
    /// Estimated upload speed in Mbps.
    pub upload_speed: f32,
}
