//! Adapters from nested backend mappings to flat chart series.
//!
//! A mapping `{key: value}` becomes one [`ChartPoint`] per key, in the
//! mapping's own order. Missing values render as zero so every key still gets
//! a bar.

use crate::models::{AdvancedAnalytics, OrderedMap, Stats, TopHost, TravelInsights};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Enumerate a mapping into points, projecting each value with `value_fn`
pub fn points<T>(map: &OrderedMap<T>, value_fn: impl Fn(&T) -> Option<f64>) -> Vec<ChartPoint> {
    map.iter()
        .map(|(name, value)| {
            let v = value_fn(value).filter(|v| v.is_finite()).unwrap_or(0.0);
            ChartPoint::new(name, v)
        })
        .collect()
}

/// Largest value in a series, 0 when empty
pub fn max_value(points: &[ChartPoint]) -> f64 {
    points.iter().map(|p| p.value).fold(0.0, f64::max)
}

// ===== Stats =====

pub fn neighborhood_avg_price(stats: &Stats) -> Vec<ChartPoint> {
    points(&stats.neighborhoods, |n| n.avg_price)
}

pub fn neighborhood_listing_counts(stats: &Stats) -> Vec<ChartPoint> {
    points(&stats.neighborhoods, |n| n.listings.map(|c| c as f64))
}

pub fn room_type_avg_price(stats: &Stats) -> Vec<ChartPoint> {
    points(&stats.room_types, |r| r.avg_price)
}

// ===== Advanced analytics =====

pub fn analytics_room_type_price(analytics: &AdvancedAnalytics) -> Vec<ChartPoint> {
    points(&analytics.price_insights.avg_price_by_room_type, |v| *v)
}

pub fn neighborhood_pricing_mean(analytics: &AdvancedAnalytics) -> Vec<ChartPoint> {
    points(&analytics.price_insights.neighborhood_pricing, |n| n.mean)
}

pub fn neighborhood_pricing_count(analytics: &AdvancedAnalytics) -> Vec<ChartPoint> {
    points(&analytics.price_insights.neighborhood_pricing, |n| n.count)
}

pub fn availability_trends(analytics: &AdvancedAnalytics) -> Vec<ChartPoint> {
    points(&analytics.booking_patterns.availability_trends, |v| *v)
}

pub fn top_host_listing_counts(analytics: &AdvancedAnalytics) -> Vec<ChartPoint> {
    points(&analytics.host_insights.top_hosts, |h| h.listings)
}

// ===== Travel and hosts =====

pub fn accommodation_types(insights: &TravelInsights) -> Vec<ChartPoint> {
    points(&insights.area_highlights.accommodation_types, |v| *v)
}

/// Listing counts for the ranked host list, in rank order
pub fn host_listing_counts(hosts: &[TopHost]) -> Vec<ChartPoint> {
    hosts
        .iter()
        .map(|h| ChartPoint::new(h.host_name.as_str(), h.listings_count.map(f64::from).unwrap_or(0.0)))
        .collect()
}
