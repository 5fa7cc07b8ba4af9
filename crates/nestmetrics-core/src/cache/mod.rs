//! Local mirror of user-visible listings.
//!
//! The listings page keeps its in-memory array mirrored to a single JSON file
//! in the data directory. On load the mirror is merged with fresh API data,
//! and when the backend is down it stands in for the API entirely.

pub mod mirror;

pub use mirror::{merge_listings, next_local_id, CachedData, MirrorStore};
