use std::fmt;

/// HTTP method used by an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// Every route the backend exposes that the dashboard consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Stats,
    Listings,
    AdvancedAnalytics,
    TopHosts,
    BookingScore,
    BookingOptimizer,
    MlPredict,
    FindDeals,
    TravelInsights,
    Test,
}

impl Endpoint {
    pub const ALL: [Endpoint; 10] = [
        Endpoint::Stats,
        Endpoint::Listings,
        Endpoint::AdvancedAnalytics,
        Endpoint::TopHosts,
        Endpoint::BookingScore,
        Endpoint::BookingOptimizer,
        Endpoint::MlPredict,
        Endpoint::FindDeals,
        Endpoint::TravelInsights,
        Endpoint::Test,
    ];

    /// Path relative to the base URL, without query string
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Stats => "/api/stats",
            Endpoint::Listings => "/api/listings",
            Endpoint::AdvancedAnalytics => "/api/advanced-analytics",
            Endpoint::TopHosts => "/api/top-hosts",
            Endpoint::BookingScore => "/api/booking-score",
            Endpoint::BookingOptimizer => "/api/booking-optimizer",
            Endpoint::MlPredict => "/api/ml-predict",
            Endpoint::FindDeals => "/api/find-deals",
            Endpoint::TravelInsights => "/api/travel-insights",
            Endpoint::Test => "/api/test",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::BookingScore
            | Endpoint::BookingOptimizer
            | Endpoint::MlPredict
            | Endpoint::FindDeals => Method::Post,
            _ => Method::Get,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Stats => "market stats",
            Endpoint::Listings => "listings",
            Endpoint::AdvancedAnalytics => "advanced analytics",
            Endpoint::TopHosts => "top hosts",
            Endpoint::BookingScore => "booking score",
            Endpoint::BookingOptimizer => "booking optimizer",
            Endpoint::MlPredict => "ML prediction",
            Endpoint::FindDeals => "deal finder",
            Endpoint::TravelInsights => "travel insights",
            Endpoint::Test => "liveness check",
        }
    }

    /// Join this endpoint onto a base URL (which must not end in `/`)
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
