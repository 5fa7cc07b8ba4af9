//! Sample payloads shown when the backend can't be reached.
//!
//! Each constructor returns data shaped exactly like the corresponding
//! endpoint's success payload, so pages render the same way whether the data
//! is live or not. [`Fetched`] records which of the two a page received.

use crate::models::{
    AdvancedAnalytics, AreaHighlights, BookingInsights, BookingOptimization, BookingOptimizerRequest,
    BookingPatterns, BookingScore, BookingTiming, BookingTrends, BudgetOptimization,
    ConfidenceInterval, ConnectionStatus, Deal, DealRequest, DealsResponse, DestinationOverview,
    HostInsights, HostSummary, HostTier, Listing, MarketTrends, MlPredictRequest, MlPrediction,
    NeighborhoodPricing, NeighborhoodStats, OrderedMap, Overview, PriceDistribution, PriceInsights,
    Stats, TopHost, TravelInsights, TravelerTips, ValuePick, ValueRecommendations,
    VerificationPricing,
};
use crate::utils::format_amount;

/// Result of a page load: live backend data, or a sample literal plus the
/// reason the live call failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Live(T),
    Fallback { data: T, reason: String },
}

impl<T> Fetched<T> {
    pub fn fallback(data: T, reason: impl Into<String>) -> Self {
        Fetched::Fallback {
            data,
            reason: reason.into(),
        }
    }

    pub fn data(&self) -> &T {
        match self {
            Fetched::Live(data) | Fetched::Fallback { data, .. } => data,
        }
    }

    pub fn data_mut(&mut self) -> &mut T {
        match self {
            Fetched::Live(data) | Fetched::Fallback { data, .. } => data,
        }
    }

    pub fn into_data(self) -> T {
        match self {
            Fetched::Live(data) | Fetched::Fallback { data, .. } => data,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Fetched::Fallback { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Fetched::Live(_) => None,
            Fetched::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Fetched::Live(data) => Fetched::Live(f(data)),
            Fetched::Fallback { data, reason } => Fetched::Fallback {
                data: f(data),
                reason,
            },
        }
    }
}

// ============================================================================
// Market data
// ============================================================================

const SAMPLE_NEIGHBORHOODS: [(&str, f64, u64); 5] = [
    ("Manhattan", 200.0, 15000),
    ("Brooklyn", 120.0, 18000),
    ("Queens", 90.0, 10000),
    ("Bronx", 75.0, 4000),
    ("Staten Island", 85.0, 1895),
];

/// Market stats shown on the dashboard and as the header of the deal and
/// travel pages.
pub fn stats() -> Stats {
    Stats {
        overview: Overview {
            avg_price: Some(152.72),
            median_price: None,
            avg_reviews: Some(1.37),
            total_listings: Some(48895),
            active_listings: Some(35000),
        },
        market_trends: Some(MarketTrends {
            seasonal_factor: Some(1.1),
            price_growth: Some("+12.5%".to_string()),
            demand_index: Some(85.0),
            supply_index: Some(78.0),
        }),
        neighborhoods: OrderedMap::from_pairs(SAMPLE_NEIGHBORHOODS.iter().map(|(name, price, count)| {
            (
                *name,
                NeighborhoodStats {
                    avg_price: Some(*price),
                    listings: Some(*count),
                    ..NeighborhoodStats::default()
                },
            )
        })),
        ..Stats::default()
    }
}

fn sample_listing(id: i64, name: &str, price: f64, neighborhood: &str, room_type: &str) -> Listing {
    Listing {
        id,
        name: Some(name.to_string()),
        neighbourhood_group: Some(neighborhood.to_string()),
        room_type: Some(room_type.to_string()),
        price: Some(price),
        ..Listing::default()
    }
}

pub fn listings() -> Vec<Listing> {
    vec![
        sample_listing(1, "Sample Listing", 150.0, "Manhattan", "Entire home/apt"),
        sample_listing(2, "Demo Property", 120.0, "Brooklyn", "Private room"),
    ]
}

const SAMPLE_HOSTS: [(&str, u32, HostTier, f64, f64); 5] = [
    ("Sarah Johnson", 12, HostTier::Superhost, 185.0, 245.0),
    ("Michael Chen", 8, HostTier::Plus, 165.0, 189.0),
    ("Emma Rodriguez", 15, HostTier::Superhost, 220.0, 312.0),
    ("David Kim", 6, HostTier::Standard, 145.0, 98.0),
    ("Lisa Thompson", 10, HostTier::Plus, 175.0, 156.0),
];

pub fn top_hosts() -> Vec<TopHost> {
    SAMPLE_HOSTS
        .iter()
        .map(|(name, count, tier, price, reviews)| TopHost {
            host_name: name.to_string(),
            listings_count: Some(*count),
            tier: *tier,
            avg_price: Some(*price),
            total_reviews: Some(*reviews),
            ..TopHost::default()
        })
        .collect()
}

pub fn advanced_analytics() -> AdvancedAnalytics {
    AdvancedAnalytics {
        price_insights: PriceInsights {
            avg_price_by_room_type: OrderedMap::from_pairs(vec![
                ("Entire home/apt", Some(180.0)),
                ("Private room", Some(85.0)),
                ("Shared room", Some(45.0)),
            ]),
            price_distribution: Some(PriceDistribution {
                q25: Some(69.0),
                median: Some(125.0),
                q75: Some(195.0),
                mean: Some(152.72),
            }),
            neighborhood_pricing: OrderedMap::from_pairs(SAMPLE_NEIGHBORHOODS.iter().map(
                |(name, price, count)| {
                    (
                        *name,
                        NeighborhoodPricing {
                            mean: Some(*price),
                            count: Some(*count as f64),
                        },
                    )
                },
            )),
        },
        host_insights: HostInsights {
            verified_vs_unverified: Some(VerificationPricing {
                verified_avg_price: Some(180.0),
                unverified_avg_price: Some(120.0),
            }),
            top_hosts: OrderedMap::from_pairs(SAMPLE_HOSTS.iter().map(
                |(name, count, _, price, reviews)| {
                    (
                        *name,
                        HostSummary {
                            listings: Some(f64::from(*count)),
                            avg_price: Some(*price),
                            total_reviews: Some(*reviews),
                        },
                    )
                },
            )),
        },
        booking_patterns: BookingPatterns {
            instant_bookable_ratio: Some(50.0),
            avg_minimum_nights: Some(7.0),
            availability_trends: OrderedMap::from_pairs(vec![
                ("Manhattan", Some(180.0)),
                ("Brooklyn", Some(165.0)),
                ("Queens", Some(190.0)),
                ("Bronx", Some(205.0)),
                ("Staten Island", Some(225.0)),
            ]),
        },
    }
}

// ============================================================================
// Travel
// ============================================================================

pub fn travel_insights(neighborhood: &str, budget: f64) -> TravelInsights {
    let is_manhattan = neighborhood == "Manhattan";
    let avg_price = match neighborhood {
        "Manhattan" => 200.0,
        "Brooklyn" => 120.0,
        _ => 90.0,
    };
    let reference_price = if is_manhattan { 200.0 } else { 120.0 };

    TravelInsights {
        destination_overview: DestinationOverview {
            total_options: Some(1250),
            within_budget: Some(890),
            avg_price: Some(avg_price),
            budget_savings: Some((budget - reference_price).max(0.0)),
        },
        booking_trends: BookingTrends {
            peak_season: Some("Summer (Jun-Aug)".to_string()),
            best_deals: Some("Winter (Dec-Feb)".to_string()),
            booking_window: Some("2-3 weeks ahead".to_string()),
            availability: Some(if budget > 150.0 { "High" } else { "Medium" }.to_string()),
        },
        traveler_tips: TravelerTips {
            price_range: Some(if is_manhattan { "$150-300" } else { "$80-180" }.to_string()),
            sweet_spot: Some(if is_manhattan { "$220" } else { "$110" }.to_string()),
            description: None,
            value_picks: vec![
                ValuePick {
                    name: Some(format!("Cozy {} Apartment", neighborhood)),
                    price: Some(budget * 0.7),
                    reviews_per_month: None,
                },
                ValuePick {
                    name: Some(format!("Modern {} Room", neighborhood)),
                    price: Some(budget * 0.8),
                    reviews_per_month: None,
                },
            ],
        },
        area_highlights: AreaHighlights {
            accommodation_types: OrderedMap::from_pairs(vec![
                ("Entire home/apt", Some(65.0)),
                ("Private room", Some(30.0)),
                ("Shared room", Some(5.0)),
            ]),
            room_distribution: None,
            popular_capacity: Some(2),
        },
        fallback: true,
    }
}

// ============================================================================
// Booking, deals and prediction
// ============================================================================

pub fn booking_score(price: f64) -> BookingScore {
    BookingScore {
        booking_score: Some(67.6),
        price_competitiveness: Some(85.0),
        availability_likelihood: Some(72.0),
        insights: BookingInsights {
            recommendation: Some("Good deal".to_string()),
            best_booking_time: Some("Weekdays".to_string()),
            booking_urgency: Some("Medium".to_string()),
            price_vs_market: Some(format!("${} vs market avg", format_amount(price))),
        },
        tips: Vec::new(),
    }
}

fn alternative_areas(neighborhood: &str) -> Vec<String> {
    if neighborhood == "Manhattan" {
        vec!["Brooklyn".to_string(), "Queens".to_string()]
    } else {
        vec!["Manhattan".to_string()]
    }
}

pub fn booking_optimization(request: &BookingOptimizerRequest) -> BookingOptimization {
    let nights = f64::from(request.trip_length.max(1));
    let daily_limit = (request.budget / nights * 100.0).round() / 100.0;

    BookingOptimization {
        budget_optimization: Some(BudgetOptimization {
            daily_limit: Some(daily_limit),
            total_budget: Some(request.budget),
            options_found: Some(0),
            avg_savings: Some(0.0),
        }),
        booking_timing: Some(BookingTiming {
            optimal_window: Some("14-21 days ahead".to_string()),
            price_trend: Some("Prices increase closer to dates".to_string()),
            best_days: Some("Tuesday-Thursday for bookings".to_string()),
            avoid_dates: Some("Major holidays and events".to_string()),
        }),
        value_recommendations: Some(ValueRecommendations {
            best_value: Vec::new(),
            budget_picks: Vec::new(),
            alternative_areas: alternative_areas(&request.neighborhood),
        }),
        booking_tips: vec![
            format!("Book accommodations for {} guests", request.guests),
            format!("Stay within ${}/night budget", format_amount(daily_limit)),
            "Read recent reviews before booking".to_string(),
            "Check cancellation policies".to_string(),
        ],
    }
}

pub fn deals(request: &DealRequest) -> DealsResponse {
    let budget = request.max_budget.max(0.0);
    let deal = |name: String, share: f64| Deal {
        name: Some(name),
        price: Some((budget * share).round()),
        reviews_per_month: Some(0.0),
        value_score: Some(100.0 - share * 100.0),
    };

    DealsResponse {
        deals_found: 2,
        best_deals: vec![
            deal(format!("Sample {} in {}", request.room_type, request.neighborhood), 0.7),
            deal(format!("Demo {} near {}", request.room_type, request.neighborhood), 0.8),
        ],
        avg_price: Some(budget * 0.75),
        price_savings: Some(budget * 0.25),
        booking_tips: vec![
            "Sample deals shown while the backend is unavailable".to_string(),
            "Book early for better availability".to_string(),
        ],
        message: None,
        suggestions: None,
    }
}

fn neighborhood_baseline(neighborhood: &str) -> f64 {
    SAMPLE_NEIGHBORHOODS
        .iter()
        .find(|(name, _, _)| *name == neighborhood)
        .map(|(_, price, _)| *price)
        .unwrap_or(120.0)
}

fn room_type_factor(room_type: &str) -> f64 {
    match room_type {
        "Private room" => 0.55,
        "Shared room" => 0.35,
        "Hotel room" => 1.1,
        _ => 1.0,
    }
}

pub fn ml_prediction(request: &MlPredictRequest) -> MlPrediction {
    let estimate = neighborhood_baseline(&request.neighbourhood_group) * room_type_factor(&request.room_type);
    let round2 = |v: f64| (v * 100.0).round() / 100.0;

    MlPrediction {
        predicted_price: Some(round2(estimate)),
        confidence_interval: Some(ConfidenceInterval {
            lower: round2(estimate * 0.85),
            upper: round2(estimate * 1.15),
        }),
        model_accuracy: Some("Sample estimate (backend unavailable)".to_string()),
        similar_listings_count: 0,
    }
}

pub fn connection_status() -> ConnectionStatus {
    ConnectionStatus {
        message: Some("Backend unavailable".to_string()),
        status: Some("offline".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetched_accessors() {
        let live = Fetched::Live(3);
        assert!(!live.is_fallback());
        assert_eq!(live.reason(), None);

        let fb = Fetched::fallback(vec![1, 2], "Network Error");
        assert!(fb.is_fallback());
        assert_eq!(fb.reason(), Some("Network Error"));
        let mapped = fb.map(|v| v.len());
        assert_eq!(mapped.data(), &2);
        assert_eq!(mapped.reason(), Some("Network Error"));
        assert_eq!(mapped.into_data(), 2);
    }

    #[test]
    fn test_dashboard_literals() {
        let stats = stats();
        assert_eq!(stats.overview.avg_price, Some(152.72));
        assert_eq!(stats.overview.avg_reviews, Some(1.37));
        assert_eq!(stats.neighborhoods.len(), 5);
        assert_eq!(stats.neighborhood_avg_price("Staten Island"), Some(85.0));

        let listings = listings();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[1].display_name(), "Demo Property");
        assert_eq!(listings[1].price, Some(120.0));
    }

    #[test]
    fn test_top_host_literals() {
        let hosts = top_hosts();
        assert_eq!(hosts.len(), 5);
        assert_eq!(hosts[2].host_name, "Emma Rodriguez");
        assert_eq!(hosts[2].listings_count, Some(15));
        assert_eq!(hosts[3].tier, HostTier::Standard);
    }

    #[test]
    fn test_travel_literal_depends_on_inputs() {
        let manhattan = travel_insights("Manhattan", 250.0);
        assert!(manhattan.fallback);
        assert_eq!(manhattan.destination_overview.avg_price, Some(200.0));
        assert_eq!(manhattan.destination_overview.budget_savings, Some(50.0));
        assert_eq!(manhattan.booking_trends.availability.as_deref(), Some("High"));
        assert_eq!(manhattan.traveler_tips.sweet_spot.as_deref(), Some("$220"));
        assert_eq!(
            manhattan.traveler_tips.value_picks[0].name.as_deref(),
            Some("Cozy Manhattan Apartment")
        );
        assert_eq!(manhattan.traveler_tips.value_picks[1].price, Some(200.0));

        let queens = travel_insights("Queens", 100.0);
        assert_eq!(queens.destination_overview.avg_price, Some(90.0));
        assert_eq!(queens.destination_overview.budget_savings, Some(0.0));
        assert_eq!(queens.booking_trends.availability.as_deref(), Some("Medium"));
        assert_eq!(queens.traveler_tips.price_range.as_deref(), Some("$80-180"));
    }

    #[test]
    fn test_booking_score_literal() {
        let score = booking_score(150.0);
        assert_eq!(score.booking_score, Some(67.6));
        assert_eq!(score.insights.price_vs_market.as_deref(), Some("$150 vs market avg"));
        assert_eq!(
            booking_score(99.5).insights.price_vs_market.as_deref(),
            Some("$99.5 vs market avg")
        );
    }

    #[test]
    fn test_optimizer_literal() {
        let opt = booking_optimization(&BookingOptimizerRequest {
            budget: 450.0,
            neighborhood: "Queens".to_string(),
            guests: 3,
            trip_length: 3,
        });
        assert_eq!(opt.budget_optimization.unwrap().daily_limit, Some(150.0));
        assert_eq!(opt.value_recommendations.unwrap().alternative_areas, vec!["Manhattan"]);
        assert_eq!(opt.booking_tips[0], "Book accommodations for 3 guests");
    }

    #[test]
    fn test_ml_literal_scales_by_room_type() {
        let entire = ml_prediction(&MlPredictRequest::default());
        assert_eq!(entire.predicted_price, Some(200.0));
        let interval = entire.confidence_interval.unwrap();
        assert_eq!(interval.lower, 170.0);
        assert_eq!(interval.upper, 230.0);

        let shared = ml_prediction(&MlPredictRequest {
            room_type: "Shared room".to_string(),
            neighbourhood_group: "Bronx".to_string(),
            ..MlPredictRequest::default()
        });
        assert_eq!(shared.predicted_price, Some(26.25));
        assert_eq!(shared.similar_listings_count, 0);
    }

    #[test]
    fn test_deals_literal() {
        let deals = deals(&DealRequest::default());
        assert_eq!(deals.deals_found, 2);
        assert_eq!(deals.best_deals[0].price, Some(140.0));
        assert_eq!(deals.avg_price, Some(150.0));
        assert!(deals.message.is_none());
    }
}
