use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MlPredictRequest {
    pub room_type: String,
    pub neighbourhood_group: String,
    pub minimum_nights: u32,
    pub availability_365: u32,
    pub host_listings: u32,
}

impl Default for MlPredictRequest {
    fn default() -> Self {
        Self {
            room_type: "Entire home/apt".to_string(),
            neighbourhood_group: "Manhattan".to_string(),
            minimum_nights: 1,
            availability_365: 365,
            host_listings: 1,
        }
    }
}

/// Result of `/api/ml-predict`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MlPrediction {
    pub predicted_price: Option<f64>,
    pub confidence_interval: Option<ConfidenceInterval>,
    pub model_accuracy: Option<String>,
    #[serde(default)]
    pub similar_listings_count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}
