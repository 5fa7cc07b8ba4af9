//! REST API client module for the NestMetrics analytics backend.
//!
//! This module provides the `ApiClient` for talking to the backend's
//! JSON-over-HTTP endpoints (market stats, listings, analytics, predictions).
//!
//! The backend has no authentication and no versioning; every request carries
//! the same fixed timeout.

pub mod client;
pub mod endpoint;
pub mod error;

pub use client::{ApiClient, ProbeResult};
pub use endpoint::{Endpoint, Method};
pub use error::ApiError;
