use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealRequest {
    pub room_type: String,
    pub neighborhood: String,
    pub guests: u32,
    pub max_budget: f64,
}

impl Default for DealRequest {
    fn default() -> Self {
        Self {
            room_type: "Entire home/apt".to_string(),
            neighborhood: "Manhattan".to_string(),
            guests: 2,
            max_budget: 200.0,
        }
    }
}

/// Result of `/api/find-deals`.
///
/// The backend answers with one of two shapes: a list of deals with pricing
/// summary, or `deals_found: 0` with a message and suggestions. Both decode
/// into this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealsResponse {
    #[serde(default)]
    pub deals_found: u64,
    #[serde(default)]
    pub best_deals: Vec<Deal>,
    pub avg_price: Option<f64>,
    pub price_savings: Option<f64>,
    #[serde(default)]
    pub booking_tips: Vec<String>,
    pub message: Option<String>,
    pub suggestions: Option<DealSuggestions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub reviews_per_month: Option<f64>,
    pub value_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealSuggestions {
    #[serde(default)]
    pub nearby_areas: Vec<String>,
    pub budget_recommendation: Option<f64>,
}

impl DealsResponse {
    pub fn has_deals(&self) -> bool {
        self.deals_found > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_found_shape() {
        let json = r#"{"deals_found": 42,
            "best_deals": [{"name": "Bright room", "price": 95, "reviews_per_month": 4.2, "value_score": 136.5}],
            "avg_price": 150.2, "price_savings": 49.8,
            "booking_tips": ["Found 42 options under $200.0"]}"#;
        let deals: DealsResponse = serde_json::from_str(json).unwrap();
        assert!(deals.has_deals());
        assert_eq!(deals.best_deals.len(), 1);
        assert_eq!(deals.best_deals[0].price, Some(95.0));
        assert!(deals.suggestions.is_none());
    }

    #[test]
    fn test_parse_none_found_shape() {
        let json = r#"{"deals_found": 0,
            "message": "No deals found. Try increasing budget or different area.",
            "suggestions": {"nearby_areas": ["Brooklyn", "Queens"], "budget_recommendation": 624.0}}"#;
        let deals: DealsResponse = serde_json::from_str(json).unwrap();
        assert!(!deals.has_deals());
        assert!(deals.best_deals.is_empty());
        let suggestions = deals.suggestions.unwrap();
        assert_eq!(suggestions.nearby_areas, vec!["Brooklyn", "Queens"]);
        assert_eq!(suggestions.budget_recommendation, Some(624.0));
    }
}
