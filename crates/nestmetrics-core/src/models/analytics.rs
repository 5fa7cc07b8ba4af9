use serde::{Deserialize, Serialize};

use super::OrderedMap;

/// Payload of `/api/advanced-analytics`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancedAnalytics {
    #[serde(default)]
    pub price_insights: PriceInsights,
    #[serde(default)]
    pub host_insights: HostInsights,
    #[serde(default)]
    pub booking_patterns: BookingPatterns,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceInsights {
    #[serde(default)]
    pub avg_price_by_room_type: OrderedMap<Option<f64>>,
    #[serde(default)]
    pub price_distribution: Option<PriceDistribution>,
    #[serde(default)]
    pub neighborhood_pricing: OrderedMap<NeighborhoodPricing>,
}

/// Quartiles of the cleaned price column
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceDistribution {
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodPricing {
    pub mean: Option<f64>,
    pub count: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostInsights {
    #[serde(default)]
    pub verified_vs_unverified: Option<VerificationPricing>,
    /// Keyed by host name, largest portfolios first
    #[serde(default)]
    pub top_hosts: OrderedMap<HostSummary>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationPricing {
    pub verified_avg_price: Option<f64>,
    pub unverified_avg_price: Option<f64>,
}

/// Per-host aggregate. Column names are the raw data-frame columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HostSummary {
    #[serde(rename = "id")]
    pub listings: Option<f64>,
    #[serde(rename = "price_$")]
    pub avg_price: Option<f64>,
    #[serde(rename = "number of reviews")]
    pub total_reviews: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingPatterns {
    pub instant_bookable_ratio: Option<f64>,
    pub avg_minimum_nights: Option<f64>,
    #[serde(default)]
    pub availability_trends: OrderedMap<Option<f64>>,
}
