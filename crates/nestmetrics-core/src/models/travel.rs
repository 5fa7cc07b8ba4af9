use serde::{Deserialize, Serialize};

use super::OrderedMap;

/// Result of `/api/travel-insights`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelInsights {
    #[serde(default)]
    pub destination_overview: DestinationOverview,
    #[serde(default)]
    pub booking_trends: BookingTrends,
    #[serde(default)]
    pub traveler_tips: TravelerTips,
    #[serde(default)]
    pub area_highlights: AreaHighlights,
    #[serde(default)]
    pub fallback: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DestinationOverview {
    pub total_options: Option<u64>,
    pub within_budget: Option<u64>,
    pub avg_price: Option<f64>,
    pub budget_savings: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingTrends {
    pub peak_season: Option<String>,
    pub best_deals: Option<String>,
    pub booking_window: Option<String>,
    pub availability: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelerTips {
    pub price_range: Option<String>,
    pub sweet_spot: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub value_picks: Vec<ValuePick>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaHighlights {
    #[serde(default)]
    pub accommodation_types: OrderedMap<Option<f64>>,
    pub room_distribution: Option<RoomDistribution>,
    pub popular_capacity: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomDistribution {
    #[serde(default)]
    pub entire_home: u64,
    #[serde(default)]
    pub private_room: u64,
    #[serde(default)]
    pub shared_room: u64,
}

/// A named listing suggestion with a nightly price
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuePick {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub reviews_per_month: Option<f64>,
}
