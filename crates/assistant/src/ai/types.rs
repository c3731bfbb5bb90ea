//! Wire types for the AI services.
//!
//! Field names on the wire are camelCase, matching the upstream flows.

use serde::{Deserialize, Serialize};

use crate::models::prediction::CarrierPrediction;

/// Request body for the answer flow.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerRequest {
    /// The user's question about mobile plans.
    pub question: String,
}

/// Response body from the answer flow.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerResponse {
    /// The generated answer text.
    pub answer: String,
}

/// Request body for the signal-prediction flow.
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    /// Latitude of the location.
    pub latitude: f64,
    /// Longitude of the location.
    pub longitude: f64,
}

/// Response body from the signal-prediction flow.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    /// One prediction per carrier, in service order.
    pub predictions: Vec<CarrierPrediction>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_request_serialization() {
        let request = AnswerRequest {
            question: "Which plan has the best 5G coverage?".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "question": "Which plan has the best 5G coverage?" })
        );
    }

    #[test]
    fn test_answer_response_deserialization() {
        let response: AnswerResponse =
            serde_json::from_str(r#"{"answer": "Airtel, in your area."}"#).unwrap();
        assert_eq!(response.answer, "Airtel, in your area.");
    }

    #[test]
    fn test_predict_request_serialization() {
        let request = PredictRequest {
            latitude: 12.9716,
            longitude: 77.5946,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"latitude\":12.9716"));
        assert!(json.contains("\"longitude\":77.5946"));
    }

    #[test]
    fn test_predict_response_deserialization() {
        let json = r#"{
            "predictions": [
                { "operator": "Jio", "rating": 4.0, "downloadSpeed": 25.5, "uploadSpeed": 8.2 },
                { "operator": "Airtel", "rating": 4.5, "downloadSpeed": 32.8, "uploadSpeed": 10.5 }
            ]
        }"#;

        let response: PredictResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.predictions.len(), 2);
        assert_eq!(response.predictions[0].operator, "Jio");
        assert!((response.predictions[1].upload_speed - 10.5).abs() < f32::EPSILON);
    }
}
