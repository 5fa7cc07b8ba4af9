use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostTier {
    Superhost,
    Plus,
    #[default]
    #[serde(other)]
    Standard,
}

impl std::fmt::Display for HostTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostTier::Superhost => write!(f, "Superhost"),
            HostTier::Plus => write!(f, "Plus"),
            HostTier::Standard => write!(f, "Standard"),
        }
    }
}

/// One row of `/api/top-hosts`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopHost {
    #[serde(default)]
    pub host_name: String,
    pub listings_count: Option<u32>,
    pub avg_reviews: Option<f64>,
    pub total_reviews: Option<f64>,
    pub avg_price: Option<f64>,
    pub price_range: Option<String>,
    pub performance_score: Option<f64>,
    #[serde(default)]
    pub tier: HostTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_top_host() {
        let json = r#"{"host_name": "Sonder (NYC)", "listings_count": 327, "avg_reviews": 0.9,
            "total_reviews": 290.4, "avg_price": 640.2, "price_range": "$52-$1196",
            "performance_score": 102.6, "tier": "Superhost"}"#;
        let host: TopHost = serde_json::from_str(json).unwrap();
        assert_eq!(host.listings_count, Some(327));
        assert_eq!(host.tier, HostTier::Superhost);
        assert_eq!(host.price_range.as_deref(), Some("$52-$1196"));
    }

    #[test]
    fn test_unknown_or_missing_tier_is_standard() {
        let host: TopHost = serde_json::from_str(r#"{"host_name": "A", "tier": "Gold"}"#).unwrap();
        assert_eq!(host.tier, HostTier::Standard);
        let host: TopHost = serde_json::from_str(r#"{"host_name": "B"}"#).unwrap();
        assert_eq!(host.tier, HostTier::Standard);
        assert!(host.avg_price.is_none());
    }
}
