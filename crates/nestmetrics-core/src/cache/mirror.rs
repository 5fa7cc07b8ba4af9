use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::Listing;

/// File holding the locally mirrored listings
const MIRROR_FILE: &str = "nestmetrics_listings.json";

/// A saved mirror older than this is shown as stale in the status bar
const STALE_MINUTES: i64 = 24 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }

    pub fn is_stale(&self) -> bool {
        self.age_minutes() > STALE_MINUTES
    }
}

/// Local mirror of the listings page.
///
/// The whole in-memory listings array is written to a single slot after every
/// change and read back on the next load. There is no versioning and no
/// conflict detection: the last writer wins.
#[derive(Debug, Clone)]
pub struct MirrorStore {
    dir: PathBuf,
}

impl MirrorStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(MIRROR_FILE)
    }

    fn read<T: DeserializeOwned>(&self) -> Result<Option<CachedData<T>>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read mirror file: {}", path.display()))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse mirror file: {}", path.display()))?;

        Ok(Some(cached))
    }

    pub fn load(&self) -> Result<Option<CachedData<Vec<Listing>>>> {
        self.read()
    }

    /// Read the slot, treating a missing or unreadable file as empty
    pub fn load_or_empty(&self) -> Vec<Listing> {
        match self.load() {
            Ok(Some(cached)) => {
                debug!(count = cached.data.len(), age = %cached.age_display(), "Loaded mirrored listings");
                cached.data
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable listings mirror");
                Vec::new()
            }
        }
    }

    pub fn save(&self, listings: &[Listing]) -> Result<()> {
        let cached = CachedData::new(listings);
        let contents = serde_json::to_string_pretty(&cached)?;
        let path = self.path();
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write mirror file: {}", path.display()))?;
        debug!(count = listings.len(), "Saved listings mirror");
        Ok(())
    }
}

/// Merge freshly fetched listings with the mirrored ones.
///
/// API entries come first and win on id collision. Mirrored entries whose id
/// is not already present follow in their saved order; repeated ids among
/// them collapse to the first occurrence.
pub fn merge_listings(api: Vec<Listing>, saved: Vec<Listing>) -> Vec<Listing> {
    let mut seen: HashSet<i64> = api.iter().map(|l| l.id).collect();
    let mut merged = api;
    merged.extend(saved.into_iter().filter(|l| seen.insert(l.id)));
    merged
}

/// Id for a new local listing: the current time in milliseconds, bumped past
/// the largest id in use
pub fn next_local_id(existing: &[Listing]) -> i64 {
    let now = Utc::now().timestamp_millis();
    let max_id = existing.iter().map(|l| l.id).max().unwrap_or(0);
    now.max(max_id.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingDraft;
    use chrono::Duration;

    fn listing(id: i64, name: &str) -> Listing {
        Listing {
            id,
            name: Some(name.to_string()),
            ..Listing::default()
        }
    }

    fn ids(listings: &[Listing]) -> Vec<i64> {
        listings.iter().map(|l| l.id).collect()
    }

    #[test]
    fn test_merge_api_wins_and_order_is_kept() {
        let api = vec![listing(3, "api three"), listing(1, "api one")];
        let saved = vec![listing(1, "local one"), listing(9, "local nine"), listing(4, "local four")];
        let merged = merge_listings(api, saved);
        assert_eq!(ids(&merged), vec![3, 1, 9, 4]);
        assert_eq!(merged[1].display_name(), "api one");
    }

    #[test]
    fn test_merge_dedups_saved_and_is_idempotent() {
        let api = vec![listing(1, "a")];
        let saved = vec![listing(2, "b"), listing(2, "b again"), listing(1, "stale a")];
        let once = merge_listings(api.clone(), saved);
        assert_eq!(ids(&once), vec![1, 2]);
        assert_eq!(once[1].display_name(), "b");

        let twice = merge_listings(api, once.clone());
        assert_eq!(twice, once);
    }

    #[test]
    fn test_merge_with_empty_sides() {
        assert!(merge_listings(Vec::new(), Vec::new()).is_empty());
        assert_eq!(ids(&merge_listings(Vec::new(), vec![listing(5, "x")])), vec![5]);
    }

    #[test]
    fn test_next_local_id() {
        let now = Utc::now().timestamp_millis();
        assert!(next_local_id(&[]) >= now);

        let far_future = now + 10_000_000;
        let existing = vec![listing(far_future, "future")];
        assert_eq!(next_local_id(&existing), far_future + 1);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = MirrorStore::new(dir.path().join("data")).unwrap();
        assert!(store.load().unwrap().is_none());

        let mut local = Listing::from_draft(1_700_000_000_000, &ListingDraft {
            name: "Local loft".to_string(),
            ..ListingDraft::default()
        });
        local.extra.insert("lat".to_string(), serde_json::json!(40.7));
        store.save(&[listing(1, "api"), local.clone()]).unwrap();

        let cached = store.load().unwrap().unwrap();
        assert_eq!(cached.data.len(), 2);
        assert_eq!(cached.data[1], local);
        assert_eq!(cached.age_display(), "just now");
        assert!(!cached.is_stale());
    }

    #[test]
    fn test_corrupt_mirror_counts_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MirrorStore::new(dir.path().to_path_buf()).unwrap();
        std::fs::write(store.path(), "[]").unwrap();
        assert!(store.load().is_err());
        assert!(store.load_or_empty().is_empty());
    }

    #[test]
    fn test_age_display() {
        let mut cached = CachedData::new(());
        cached.cached_at = Utc::now() - Duration::minutes(5);
        assert_eq!(cached.age_display(), "5m ago");
        cached.cached_at = Utc::now() - Duration::minutes(95);
        assert_eq!(cached.age_display(), "2h ago");
        cached.cached_at = Utc::now() - Duration::days(3);
        assert_eq!(cached.age_display(), "3d ago");
        assert!(cached.is_stale());
    }
}
