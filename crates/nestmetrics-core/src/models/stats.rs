use serde::{Deserialize, Serialize};

use super::OrderedMap;

/// Market-wide statistics from `/api/stats`.
///
/// When its data set is missing the backend still answers 200 with a partial
/// payload and sets `fallback` and/or `error`, so every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub overview: Overview,
    #[serde(default)]
    pub market_trends: Option<MarketTrends>,
    #[serde(default)]
    pub neighborhoods: OrderedMap<NeighborhoodStats>,
    #[serde(default)]
    pub room_types: OrderedMap<RoomTypeStats>,
    #[serde(default)]
    pub performance_tiers: Option<PerformanceTiers>,
    #[serde(default)]
    pub fallback: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub avg_price: Option<f64>,
    pub median_price: Option<f64>,
    pub avg_reviews: Option<f64>,
    pub total_listings: Option<u64>,
    pub active_listings: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketTrends {
    pub seasonal_factor: Option<f64>,
    pub price_growth: Option<String>,
    pub demand_index: Option<f64>,
    pub supply_index: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodStats {
    pub avg_price: Option<f64>,
    pub median_price: Option<f64>,
    pub listings: Option<u64>,
    pub avg_reviews: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomTypeStats {
    pub avg_price: Option<f64>,
    pub listings: Option<u64>,
    pub avg_reviews: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTiers {
    #[serde(default)]
    pub premium: u64,
    #[serde(default)]
    pub standard: u64,
    #[serde(default)]
    pub budget: u64,
}

impl PerformanceTiers {
    pub fn total(&self) -> u64 {
        self.premium + self.standard + self.budget
    }
}

impl Stats {
    /// Average nightly price for a neighborhood, if the backend reported one
    pub fn neighborhood_avg_price(&self, neighborhood: &str) -> Option<f64> {
        self.neighborhoods.get(neighborhood).and_then(|n| n.avg_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_degraded_payload() {
        let json = r#"{
            "overview": {"avg_price": 152.72, "avg_reviews": 1.4, "total_listings": 48895, "active_listings": 35000},
            "error": "No data loaded, using fallback"
        }"#;
        let stats: Stats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.overview.total_listings, Some(48895));
        assert!(stats.overview.median_price.is_none());
        assert!(stats.market_trends.is_none());
        assert!(stats.neighborhoods.is_empty());
        assert_eq!(stats.error.as_deref(), Some("No data loaded, using fallback"));
    }

    #[test]
    fn test_parse_full_payload() {
        let json = r#"{
            "overview": {"avg_price": 130.5, "median_price": 110.0, "avg_reviews": 1.1, "total_listings": 100, "active_listings": 80},
            "market_trends": {"seasonal_factor": 0.9, "price_growth": "+12.5%", "demand_index": 85, "supply_index": 78},
            "neighborhoods": {"Bronx": {"avg_price": 80.0, "median_price": 70.0, "listings": 10, "avg_reviews": 1.0},
                              "Brooklyn": {"avg_price": 120.0, "median_price": 100.0, "listings": 40, "avg_reviews": 1.2}},
            "room_types": {"Private room": {"avg_price": 85.0, "listings": 50, "avg_reviews": 1.3}},
            "performance_tiers": {"premium": 20, "standard": 60, "budget": 20}
        }"#;
        let stats: Stats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.neighborhood_avg_price("Brooklyn"), Some(120.0));
        assert_eq!(stats.neighborhoods.keys().collect::<Vec<_>>(), vec!["Bronx", "Brooklyn"]);
        assert_eq!(stats.performance_tiers.map(|t| t.total()), Some(100));
        assert!(!stats.fallback);
    }
}
