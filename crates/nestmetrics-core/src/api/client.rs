//! API client for the NestMetrics analytics backend.
//!
//! This module provides the `ApiClient` struct for fetching market data,
//! listings and model predictions over plain JSON/HTTP.

use std::borrow::Cow;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::models::{
    AdvancedAnalytics, BookingOptimization, BookingOptimizerRequest, BookingScore,
    BookingScoreRequest, ConnectionStatus, DealRequest, DealsResponse, Listing, MlPredictRequest,
    MlPrediction, Stats, TopHost, TravelInsights,
};

use super::{ApiError, Endpoint, Method};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout. The backend computes aggregates over the full data
/// set on every call, so this is the only bound on a slow page.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum concurrent requests when probing every endpoint
const MAX_CONCURRENT_PROBES: usize = 4;

/// Outcome of probing a single endpoint
#[derive(Debug)]
pub struct ProbeResult {
    pub endpoint: Endpoint,
    pub elapsed: Duration,
    pub result: Result<()>,
}

/// API client for the analytics backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the given base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn read_json<T: DeserializeOwned>(endpoint: Endpoint, response: reqwest::Response) -> Result<T> {
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read {} response body", endpoint.label()))?;
        let text = sanitize_non_finite(&text);
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
            .with_context(|| format!("Failed to parse {} response", endpoint.label()))
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint, query: &[(&str, String)]) -> Result<T> {
        let url = endpoint.url(&self.base_url);
        debug!(endpoint = %endpoint, url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        Self::read_json(endpoint, response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, endpoint: Endpoint, body: &B) -> Result<T> {
        let url = endpoint.url(&self.base_url);
        debug!(endpoint = %endpoint, url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(response).await?;
        Self::read_json(endpoint, response).await
    }

    // ===== Market Data =====

    pub async fn fetch_stats(&self) -> Result<Stats> {
        self.get(Endpoint::Stats, &[]).await
    }

    /// Fetch up to `limit` listings. Rows without a usable id are dropped.
    pub async fn fetch_listings(&self, limit: usize) -> Result<Vec<Listing>> {
        let rows: Vec<Value> = self
            .get(Endpoint::Listings, &[("limit", limit.to_string())])
            .await?;

        let total = rows.len();
        let listings: Vec<Listing> = rows.into_iter().filter_map(Listing::from_value).collect();
        if listings.len() < total {
            debug!(skipped = total - listings.len(), "Skipped listings without an id");
        }
        Ok(listings)
    }

    pub async fn fetch_advanced_analytics(&self) -> Result<AdvancedAnalytics> {
        self.get(Endpoint::AdvancedAnalytics, &[]).await
    }

    pub async fn fetch_top_hosts(&self) -> Result<Vec<TopHost>> {
        self.get(Endpoint::TopHosts, &[]).await
    }

    pub async fn fetch_travel_insights(&self, neighborhood: &str, budget: f64) -> Result<TravelInsights> {
        let query = [
            ("neighborhood", neighborhood.to_string()),
            ("budget", budget.to_string()),
        ];
        self.get(Endpoint::TravelInsights, &query).await
    }

    // ===== Scoring and Prediction =====

    pub async fn booking_score(&self, request: &BookingScoreRequest) -> Result<BookingScore> {
        self.post(Endpoint::BookingScore, request).await
    }

    pub async fn booking_optimizer(&self, request: &BookingOptimizerRequest) -> Result<BookingOptimization> {
        self.post(Endpoint::BookingOptimizer, request).await
    }

    pub async fn ml_predict(&self, request: &MlPredictRequest) -> Result<MlPrediction> {
        self.post(Endpoint::MlPredict, request).await
    }

    pub async fn find_deals(&self, request: &DealRequest) -> Result<DealsResponse> {
        self.post(Endpoint::FindDeals, request).await
    }

    // ===== Diagnostics =====

    pub async fn test_connection(&self) -> Result<ConnectionStatus> {
        self.get(Endpoint::Test, &[]).await
    }

    /// Issue a minimal GET against an endpoint and discard the body.
    /// Used by the `--test-connection` report.
    pub async fn probe(&self, endpoint: Endpoint) -> Result<()> {
        let query: Vec<(&str, String)> = match endpoint {
            Endpoint::Listings => vec![("limit", "1".to_string())],
            Endpoint::TravelInsights => vec![
                ("neighborhood", "Manhattan".to_string()),
                ("budget", "200".to_string()),
            ],
            _ => Vec::new(),
        };
        if endpoint.method() != Method::Get {
            bail!("{} cannot be probed without a request body", endpoint);
        }
        let _: Value = self.get(endpoint, &query).await?;
        Ok(())
    }

    /// Probe every GET endpoint concurrently. Results come back in table order.
    pub async fn probe_all(&self) -> Vec<ProbeResult> {
        let endpoints = Endpoint::ALL.into_iter().filter(|e| e.method() == Method::Get);

        let mut results: Vec<ProbeResult> = stream::iter(endpoints)
            .map(|endpoint| async move {
                let started = Instant::now();
                let result = self.probe(endpoint).await;
                ProbeResult {
                    endpoint,
                    elapsed: started.elapsed(),
                    result,
                }
            })
            .buffer_unordered(MAX_CONCURRENT_PROBES)
            .collect()
            .await;

        results.sort_by_key(|r| Endpoint::ALL.iter().position(|e| *e == r.endpoint));
        results
    }
}

/// The backend serializes missing data-frame cells as bare `NaN`/`Infinity`
/// tokens, which are not JSON. Replace them with `null` outside of strings.
fn sanitize_non_finite(text: &str) -> Cow<'_, str> {
    if !text.contains("NaN") && !text.contains("Infinity") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else {
            let token = ["-Infinity", "Infinity", "NaN"]
                .into_iter()
                .find(|t| rest.starts_with(t));
            if let Some(token) = token {
                out.push_str("null");
                rest = &rest[token.len()..];
                continue;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_removed() {
        let client = ApiClient::new("http://localhost:5001/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5001");
    }

    #[test]
    fn test_sanitize_non_finite() {
        let raw = r#"[{"id": 1, "price_$": NaN, "NAME": "NaN Villa", "lat": -Infinity}]"#;
        let clean = sanitize_non_finite(raw);
        assert_eq!(clean, r#"[{"id": 1, "price_$": null, "NAME": "NaN Villa", "lat": null}]"#);

        let value: Value = serde_json::from_str(&clean).unwrap();
        assert!(value[0]["price_$"].is_null());
    }

    #[test]
    fn test_sanitize_leaves_escaped_quotes_alone() {
        let raw = r#"{"NAME": "The \"NaN\" loft", "x": NaN}"#;
        assert_eq!(
            sanitize_non_finite(raw),
            r#"{"NAME": "The \"NaN\" loft", "x": null}"#
        );
        assert!(matches!(sanitize_non_finite(r#"{"a": 1}"#), Cow::Borrowed(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let err = client.fetch_stats().await.unwrap_err();
        let api_err = err.downcast_ref::<ApiError>().unwrap();
        assert!(matches!(api_err, ApiError::NetworkError(_)));
    }

    #[tokio::test]
    async fn test_fetch_listings_drops_rows_without_id() {
        use axum::{response::Json, routing::get, Router};

        let router = Router::new().route(
            "/api/listings",
            get(|| async {
                Json(serde_json::json!([
                    {"id": 1, "NAME": "Sunny Loft"},
                    {"NAME": "No id"},
                    {"id": null, "NAME": "Null id"},
                    {"id": 3, "NAME": "Park view"}
                ]))
            }),
        );
        let base = crate::test_support::serve(router).await;

        let client = ApiClient::new(&base).unwrap();
        let listings = client.fetch_listings(10).await.unwrap();
        let ids: Vec<i64> = listings.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(listings[0].name.as_deref(), Some("Sunny Loft"));
    }

    #[tokio::test]
    async fn test_error_status_keeps_backend_message() {
        use axum::{http::StatusCode, response::Json, routing::get, Router};

        let router = Router::new().route(
            "/api/travel-insights",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(serde_json::json!({"error": "No data for this area"})),
                )
            }),
        );
        let base = crate::test_support::serve(router).await;

        let client = ApiClient::new(&base).unwrap();
        let err = client.fetch_travel_insights("Bronx", 50.0).await.unwrap_err();
        let api_err = err.downcast_ref::<ApiError>().unwrap();
        assert!(matches!(api_err, ApiError::NotFound(msg) if msg == "No data for this area"));
    }

    #[tokio::test]
    async fn test_probe_rejects_post_endpoints() {
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        assert!(client.probe(Endpoint::MlPredict).await.is_err());
    }

    #[tokio::test]
    async fn test_probe_all_covers_get_endpoints_in_order() {
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let results = client.probe_all().await;
        let endpoints: Vec<_> = results.iter().map(|r| r.endpoint).collect();
        assert_eq!(
            endpoints,
            vec![
                Endpoint::Stats,
                Endpoint::Listings,
                Endpoint::AdvancedAnalytics,
                Endpoint::TopHosts,
                Endpoint::TravelInsights,
                Endpoint::Test
            ]
        );
        assert!(results.iter().all(|r| r.result.is_err()));
    }
}
