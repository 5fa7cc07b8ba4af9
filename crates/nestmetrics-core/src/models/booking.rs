use serde::{Deserialize, Serialize};

use super::{ConnectionStatus, ValuePick};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingScoreRequest {
    pub price: f64,
    pub neighborhood: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<String>,
}

/// Result of `/api/booking-score`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingScore {
    pub booking_score: Option<f64>,
    pub price_competitiveness: Option<f64>,
    pub availability_likelihood: Option<f64>,
    #[serde(default)]
    pub insights: BookingInsights,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingInsights {
    pub best_booking_time: Option<String>,
    pub booking_urgency: Option<String>,
    pub price_vs_market: Option<String>,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingOptimizerRequest {
    pub budget: f64,
    pub neighborhood: String,
    pub guests: u32,
    pub trip_length: u32,
}

/// Result of `/api/booking-optimizer`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingOptimization {
    pub budget_optimization: Option<BudgetOptimization>,
    pub booking_timing: Option<BookingTiming>,
    pub value_recommendations: Option<ValueRecommendations>,
    #[serde(default)]
    pub booking_tips: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetOptimization {
    pub daily_limit: Option<f64>,
    pub total_budget: Option<f64>,
    pub options_found: Option<u64>,
    pub avg_savings: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingTiming {
    pub optimal_window: Option<String>,
    pub price_trend: Option<String>,
    pub best_days: Option<String>,
    pub avoid_dates: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueRecommendations {
    #[serde(default)]
    pub best_value: Vec<ValuePick>,
    #[serde(default)]
    pub budget_picks: Vec<ValuePick>,
    #[serde(default)]
    pub alternative_areas: Vec<String>,
}

/// The booking form as entered on the Booking tab
#[derive(Debug, Clone, PartialEq)]
pub struct BookingForm {
    pub price: f64,
    pub neighborhood: String,
    pub listing_id: String,
    pub guests: u32,
    pub trip_length: u32,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            price: 150.0,
            neighborhood: "Manhattan".to_string(),
            listing_id: String::new(),
            guests: 2,
            trip_length: 3,
        }
    }
}

impl BookingForm {
    pub fn score_request(&self) -> BookingScoreRequest {
        let listing_id = self.listing_id.trim();
        BookingScoreRequest {
            price: self.price,
            neighborhood: self.neighborhood.clone(),
            listing_id: (!listing_id.is_empty()).then(|| listing_id.to_string()),
        }
    }

    /// The optimizer is asked about the whole trip: nightly price times nights
    pub fn optimizer_request(&self) -> BookingOptimizerRequest {
        BookingOptimizerRequest {
            budget: self.price * f64::from(self.trip_length),
            neighborhood: self.neighborhood.clone(),
            guests: self.guests,
            trip_length: self.trip_length,
        }
    }
}

/// Combined outcome of the booking page's three calls
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingAnalysis {
    pub connection: Option<ConnectionStatus>,
    pub score: BookingScore,
    pub optimization: Option<BookingOptimization>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_request_omits_empty_listing_id() {
        let form = BookingForm::default();
        let body = serde_json::to_value(form.score_request()).unwrap();
        assert_eq!(body, serde_json::json!({"price": 150.0, "neighborhood": "Manhattan"}));

        let form = BookingForm {
            listing_id: " 1001254 ".to_string(),
            ..BookingForm::default()
        };
        assert_eq!(form.score_request().listing_id.as_deref(), Some("1001254"));
    }

    #[test]
    fn test_optimizer_budget_covers_trip() {
        let form = BookingForm {
            price: 120.0,
            trip_length: 4,
            ..BookingForm::default()
        };
        let req = form.optimizer_request();
        assert_eq!(req.budget, 480.0);
        assert_eq!(req.guests, 2);
    }

    #[test]
    fn test_parse_optimizer_payload() {
        let json = r#"{
            "budget_optimization": {"daily_limit": 66.67, "total_budget": 200.0, "options_found": 12, "avg_savings": 8.2},
            "booking_timing": {"optimal_window": "14-21 days ahead", "price_trend": "Prices increase closer to dates",
                               "best_days": "Tuesday-Thursday for bookings", "avoid_dates": "Major holidays and events"},
            "value_recommendations": {"best_value": [{"name": "Cozy room", "price": 60, "reviews_per_month": 3.1}],
                                      "budget_picks": [{"name": "Tiny room", "price": 40}],
                                      "alternative_areas": ["Brooklyn", "Queens"]},
            "booking_tips": ["Read recent reviews before booking"]
        }"#;
        let opt: BookingOptimization = serde_json::from_str(json).unwrap();
        let values = opt.value_recommendations.unwrap();
        assert_eq!(values.best_value[0].price, Some(60.0));
        assert!(values.budget_picks[0].reviews_per_month.is_none());
        assert_eq!(opt.budget_optimization.unwrap().options_found, Some(12));
    }
}
