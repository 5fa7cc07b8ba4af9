//! Data models for NestMetrics backend payloads.
//!
//! These mirror the JSON the analytics backend returns. No schema is
//! enforced on the wire, so nearly every field is optional:
//!
//! - `Listing`, `ListingDraft`: listing rows and the local add/edit form
//! - `Stats`: market overview, trends and per-group aggregates
//! - `AdvancedAnalytics`: price, host and booking-pattern insights
//! - `TopHost`: ranked hosts with a performance tier
//! - Booking, deals, travel and prediction request/response pairs
//! - `OrderedMap`: JSON objects decoded in document order

pub mod analytics;
pub mod booking;
pub mod deals;
pub mod hosts;
pub mod listing;
pub mod ordered;
pub mod prediction;
pub mod stats;
pub mod travel;

use serde::{Deserialize, Serialize};

pub use analytics::{
    AdvancedAnalytics, BookingPatterns, HostInsights, HostSummary, NeighborhoodPricing,
    PriceDistribution, PriceInsights, VerificationPricing,
};
pub use booking::{
    BookingAnalysis, BookingForm, BookingInsights, BookingOptimization, BookingOptimizerRequest,
    BookingScore, BookingScoreRequest, BookingTiming, BudgetOptimization, ValueRecommendations,
};
pub use deals::{Deal, DealRequest, DealSuggestions, DealsResponse};
pub use hosts::{HostTier, TopHost};
pub use listing::{Listing, ListingDraft, BOOKABLE_ROOM_TYPES, NEIGHBORHOODS, ROOM_TYPES};
pub use ordered::OrderedMap;
pub use prediction::{ConfidenceInterval, MlPredictRequest, MlPrediction};
pub use stats::{MarketTrends, NeighborhoodStats, Overview, PerformanceTiers, RoomTypeStats, Stats};
pub use travel::{
    AreaHighlights, BookingTrends, DestinationOverview, RoomDistribution, TravelInsights,
    TravelerTips, ValuePick,
};

/// Response of the `/api/test` liveness endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub message: Option<String>,
    pub status: Option<String>,
}

impl ConnectionStatus {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}
