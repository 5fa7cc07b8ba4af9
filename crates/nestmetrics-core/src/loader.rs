//! Page loads with sample-data fallback.
//!
//! Every method issues the page's backend calls once. On success the payload
//! is returned unchanged as [`Fetched::Live`]; on any failure the error is
//! logged and the endpoint's sample literal is returned instead. There is no
//! retry and no cancellation.

use anyhow::Result;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError, Endpoint};
use crate::cache::{merge_listings, MirrorStore};
use crate::fallback::{self, Fetched};
use crate::models::{
    AdvancedAnalytics, BookingAnalysis, BookingForm, BookingOptimization,
    BookingOptimizerRequest, BookingScore, BookingScoreRequest, ConnectionStatus, DealRequest,
    DealsResponse, Listing, MlPredictRequest, MlPrediction, Stats, TopHost, TravelInsights,
};

/// Listings shown alongside the dashboard stats
pub const DASHBOARD_LISTINGS_LIMIT: usize = 50;

/// Everything the dashboard renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub stats: Stats,
    pub listings: Vec<Listing>,
}

/// Short failure label in the style of the toasts: an HTTP status code, or
/// `Network Error` when no response arrived
pub fn failure_label(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ApiError>() {
        Some(api_err) => api_err.status_label(),
        None => "Network Error".to_string(),
    }
}

fn settle<T>(endpoint: Endpoint, result: Result<T>, fallback: impl FnOnce() -> T) -> Fetched<T> {
    match result {
        Ok(data) => Fetched::Live(data),
        Err(e) => {
            warn!(endpoint = %endpoint, error = %format!("{:#}", e), "Request failed, using sample data");
            Fetched::fallback(fallback(), failure_label(&e))
        }
    }
}

#[derive(Clone)]
pub struct Loader {
    client: ApiClient,
    dashboard_limit: usize,
}

impl Loader {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            dashboard_limit: DASHBOARD_LISTINGS_LIMIT,
        }
    }

    pub fn with_dashboard_limit(mut self, limit: usize) -> Self {
        self.dashboard_limit = limit;
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Stats and listings together. Both are issued concurrently, and if
    /// either fails both are replaced with sample data.
    pub async fn dashboard(&self) -> Fetched<Dashboard> {
        let (stats, listings) = tokio::join!(
            self.client.fetch_stats(),
            self.client.fetch_listings(self.dashboard_limit)
        );

        let result = match (stats, listings) {
            (Ok(stats), Ok(listings)) => Ok(Dashboard { stats, listings }),
            (Err(e), _) | (_, Err(e)) => Err(e),
        };

        settle(Endpoint::Stats, result, || Dashboard {
            stats: fallback::stats(),
            listings: fallback::listings(),
        })
    }

    pub async fn stats(&self) -> Fetched<Stats> {
        settle(Endpoint::Stats, self.client.fetch_stats().await, fallback::stats)
    }

    pub async fn analytics(&self) -> Fetched<AdvancedAnalytics> {
        settle(
            Endpoint::AdvancedAnalytics,
            self.client.fetch_advanced_analytics().await,
            fallback::advanced_analytics,
        )
    }

    pub async fn top_hosts(&self) -> Fetched<Vec<TopHost>> {
        settle(Endpoint::TopHosts, self.client.fetch_top_hosts().await, fallback::top_hosts)
    }

    pub async fn travel_insights(&self, neighborhood: &str, budget: f64) -> Fetched<TravelInsights> {
        settle(
            Endpoint::TravelInsights,
            self.client.fetch_travel_insights(neighborhood, budget).await,
            || fallback::travel_insights(neighborhood, budget),
        )
    }

    pub async fn find_deals(&self, request: &DealRequest) -> Fetched<DealsResponse> {
        settle(Endpoint::FindDeals, self.client.find_deals(request).await, || {
            fallback::deals(request)
        })
    }

    pub async fn ml_predict(&self, request: &MlPredictRequest) -> Fetched<MlPrediction> {
        settle(Endpoint::MlPredict, self.client.ml_predict(request).await, || {
            fallback::ml_prediction(request)
        })
    }

    pub async fn booking_score(&self, request: &BookingScoreRequest) -> Fetched<BookingScore> {
        settle(Endpoint::BookingScore, self.client.booking_score(request).await, || {
            fallback::booking_score(request.price)
        })
    }

    pub async fn booking_optimizer(&self, request: &BookingOptimizerRequest) -> Fetched<BookingOptimization> {
        settle(Endpoint::BookingOptimizer, self.client.booking_optimizer(request).await, || {
            fallback::booking_optimization(request)
        })
    }

    /// Backend liveness. The fallback reports the backend as offline.
    pub async fn connection(&self) -> Fetched<ConnectionStatus> {
        settle(Endpoint::Test, self.client.test_connection().await, fallback::connection_status)
    }

    /// Liveness check, then booking score, then the trip optimizer.
    ///
    /// A failed check or score falls back as a whole. The optimizer is
    /// optional: if only it fails the analysis is still live, without it.
    pub async fn booking_analysis(&self, form: &BookingForm) -> Fetched<BookingAnalysis> {
        let attempt = async {
            let connection = self.client.test_connection().await?;
            let score = self.client.booking_score(&form.score_request()).await?;
            Ok::<_, anyhow::Error>((connection, score))
        }
        .await;

        let (connection, score) = match attempt {
            Ok(pair) => pair,
            Err(e) => {
                return settle(Endpoint::BookingScore, Err(e), || BookingAnalysis {
                    connection: None,
                    score: fallback::booking_score(form.price),
                    optimization: None,
                });
            }
        };

        let optimization = match self.client.booking_optimizer(&form.optimizer_request()).await {
            Ok(opt) => Some(opt),
            Err(e) => {
                info!(error = %format!("{:#}", e), "Optimizer not available, continuing without it");
                None
            }
        };

        Fetched::Live(BookingAnalysis {
            connection: Some(connection),
            score,
            optimization,
        })
    }

    /// Fetch listings and merge in the local mirror. When the fetch fails the
    /// mirror alone is the fallback.
    pub async fn listings(&self, limit: usize, store: &MirrorStore) -> Fetched<Vec<Listing>> {
        let fetched = self.client.fetch_listings(limit).await;
        let saved = store.load_or_empty();
        match fetched {
            Ok(api) => Fetched::Live(merge_listings(api, saved)),
            Err(e) => settle(Endpoint::Listings, Err(e), || saved),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{
        http::StatusCode,
        response::Json,
        routing::{get, post},
        Router,
    };
    use serde_json::json;

    /// Nothing listens on the discard port, so every call is refused
    fn offline_loader() -> Loader {
        Loader::new(ApiClient::new("http://127.0.0.1:9").unwrap())
    }

    #[tokio::test]
    async fn test_dashboard_falls_back_as_a_whole() {
        let result = offline_loader().dashboard().await;
        assert!(result.is_fallback());
        assert_eq!(result.reason(), Some("Network Error"));
        let dashboard = result.into_data();
        assert_eq!(dashboard.stats, fallback::stats());
        assert_eq!(dashboard.listings, fallback::listings());
    }

    #[tokio::test]
    async fn test_each_endpoint_yields_its_literal() {
        let loader = offline_loader();

        assert_eq!(loader.stats().await.into_data(), fallback::stats());
        assert_eq!(loader.analytics().await.into_data(), fallback::advanced_analytics());
        assert_eq!(loader.top_hosts().await.into_data(), fallback::top_hosts());
        assert_eq!(
            loader.travel_insights("Brooklyn", 180.0).await.into_data(),
            fallback::travel_insights("Brooklyn", 180.0)
        );

        let deal_request = DealRequest::default();
        assert_eq!(loader.find_deals(&deal_request).await.into_data(), fallback::deals(&deal_request));

        let ml_request = MlPredictRequest::default();
        let prediction = loader.ml_predict(&ml_request).await;
        assert!(prediction.is_fallback());
        assert_eq!(prediction.into_data(), fallback::ml_prediction(&ml_request));

        let optimizer_request = BookingForm::default().optimizer_request();
        assert_eq!(
            loader.booking_optimizer(&optimizer_request).await.into_data(),
            fallback::booking_optimization(&optimizer_request)
        );

        let connection = loader.connection().await;
        assert!(connection.is_fallback());
        assert!(!connection.data().is_ok());

        let score_request = BookingForm::default().score_request();
        assert_eq!(
            loader.booking_score(&score_request).await.into_data(),
            fallback::booking_score(150.0)
        );
    }

    #[tokio::test]
    async fn test_booking_analysis_fallback() {
        let form = BookingForm {
            price: 99.0,
            ..BookingForm::default()
        };
        let result = offline_loader().booking_analysis(&form).await;
        assert!(result.is_fallback());
        let analysis = result.into_data();
        assert!(analysis.connection.is_none());
        assert!(analysis.optimization.is_none());
        assert_eq!(
            analysis.score.insights.price_vs_market.as_deref(),
            Some("$99 vs market avg")
        );
    }

    #[tokio::test]
    async fn test_listings_fall_back_to_mirror() {
        let dir = tempfile::tempdir().unwrap();
        let store = MirrorStore::new(dir.path().to_path_buf()).unwrap();
        let loader = offline_loader();

        let empty = loader.listings(100, &store).await;
        assert!(empty.is_fallback());
        assert!(empty.data().is_empty());

        let saved = fallback::listings();
        store.save(&saved).unwrap();
        let result = loader.listings(100, &store).await;
        assert!(result.is_fallback());
        assert_eq!(result.into_data(), saved);
    }

    fn listings_json(ids: &[i64]) -> serde_json::Value {
        json!(ids
            .iter()
            .map(|id| json!({"id": id, "NAME": format!("Backend {}", id), "price_$": 120}))
            .collect::<Vec<_>>())
    }

    fn stats_json() -> serde_json::Value {
        json!({
            "overview": {"avg_price": 212.5, "median_price": 150.0, "total_listings": 48895},
            "neighborhoods": {"Queens": {"avg_price": 99.5, "count": 5666}}
        })
    }

    fn server_error() -> (StatusCode, Json<serde_json::Value>) {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"})))
    }

    #[tokio::test]
    async fn test_live_payload_is_returned_unchanged() {
        let base = serve(Router::new().route("/api/stats", get(|| async { Json(stats_json()) }))).await;
        let loader = Loader::new(ApiClient::new(&base).unwrap());

        let result = loader.stats().await;
        assert!(!result.is_fallback());
        assert_eq!(result.reason(), None);
        let expected: Stats = serde_json::from_value(stats_json()).unwrap();
        assert_eq!(result.into_data(), expected);
    }

    #[tokio::test]
    async fn test_dashboard_live_when_both_succeed() {
        let router = Router::new()
            .route("/api/stats", get(|| async { Json(stats_json()) }))
            .route("/api/listings", get(|| async { Json(listings_json(&[7, 8])) }));
        let base = serve(router).await;
        let loader = Loader::new(ApiClient::new(&base).unwrap());

        let result = loader.dashboard().await;
        assert!(!result.is_fallback());
        let dashboard = result.into_data();
        assert_eq!(dashboard.stats.overview.total_listings, Some(48895));
        let ids: Vec<i64> = dashboard.listings.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![7, 8]);
    }

    #[tokio::test]
    async fn test_dashboard_listings_failure_replaces_stats_too() {
        let router = Router::new()
            .route("/api/stats", get(|| async { Json(stats_json()) }))
            .route("/api/listings", get(|| async { server_error() }));
        let base = serve(router).await;
        let loader = Loader::new(ApiClient::new(&base).unwrap());

        let result = loader.dashboard().await;
        assert!(result.is_fallback());
        assert_eq!(result.reason(), Some("500"));
        let dashboard = result.into_data();
        assert_eq!(dashboard.stats, fallback::stats());
        assert_eq!(dashboard.listings, fallback::listings());
    }

    #[tokio::test]
    async fn test_booking_analysis_without_optimizer() {
        let router = Router::new()
            .route(
                "/api/test",
                get(|| async { Json(json!({"message": "API is working!", "status": "success"})) }),
            )
            .route(
                "/api/booking-score",
                post(|| async { Json(json!({"booking_score": 82.0, "tips": ["Book early"]})) }),
            )
            .route("/api/booking-optimizer", post(|| async { server_error() }));
        let base = serve(router).await;
        let loader = Loader::new(ApiClient::new(&base).unwrap());

        let result = loader.booking_analysis(&BookingForm::default()).await;
        assert!(!result.is_fallback());
        let analysis = result.into_data();
        assert!(analysis.connection.as_ref().is_some_and(|c| c.is_ok()));
        assert_eq!(analysis.score.booking_score, Some(82.0));
        assert_eq!(analysis.score.tips, vec!["Book early".to_string()]);
        assert!(analysis.optimization.is_none());
    }

    #[tokio::test]
    async fn test_booking_analysis_score_failure_falls_back() {
        let router = Router::new()
            .route("/api/test", get(|| async { Json(json!({"status": "success"})) }))
            .route("/api/booking-score", post(|| async { server_error() }));
        let base = serve(router).await;
        let loader = Loader::new(ApiClient::new(&base).unwrap());

        let form = BookingForm {
            price: 99.0,
            ..BookingForm::default()
        };
        let result = loader.booking_analysis(&form).await;
        assert!(result.is_fallback());
        assert_eq!(result.reason(), Some("500"));
        let analysis = result.into_data();
        assert!(analysis.connection.is_none());
        assert_eq!(analysis.score, fallback::booking_score(99.0));
    }

    #[tokio::test]
    async fn test_listings_merge_backend_first() {
        let base = serve(Router::new().route("/api/listings", get(|| async { Json(listings_json(&[1, 2])) }))).await;
        let loader = Loader::new(ApiClient::new(&base).unwrap());

        let dir = tempfile::tempdir().unwrap();
        let store = MirrorStore::new(dir.path().to_path_buf()).unwrap();
        let saved = vec![
            Listing {
                id: 2,
                name: Some("Saved copy".to_string()),
                ..Listing::default()
            },
            Listing {
                id: 9,
                name: Some("Local only".to_string()),
                ..Listing::default()
            },
        ];
        store.save(&saved).unwrap();

        let result = loader.listings(100, &store).await;
        assert!(!result.is_fallback());
        let listings = result.into_data();
        let ids: Vec<i64> = listings.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 9]);
        assert_eq!(listings[1].name.as_deref(), Some("Backend 2"));
        assert_eq!(listings[2].name.as_deref(), Some("Local only"));
    }

    #[test]
    fn test_failure_label() {
        let err: anyhow::Error = ApiError::NotFound("No data for this area".to_string()).into();
        assert_eq!(failure_label(&err), "404");
        let err = anyhow::anyhow!("socket closed");
        assert_eq!(failure_label(&err), "Network Error");
    }
}
