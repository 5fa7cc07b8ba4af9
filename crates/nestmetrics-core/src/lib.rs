//! Core library for NestMetrics.
//!
//! Everything the terminal app needs that is not rendering lives here:
//!
//! - `api`: HTTP client for the analytics backend and its endpoint table
//! - `models`: transport-layer JSON shapes returned by the backend
//! - `fallback`: literal sample payloads substituted when a request fails
//! - `loader`: per-page fetch-or-fallback operations
//! - `cache`: local mirror store for the listings array
//! - `filter`: listing filter predicates
//! - `charts`: adapters from nested mappings to chart points
//! - `config`: configuration file and environment overrides

pub mod api;
pub mod cache;
pub mod charts;
pub mod config;
pub mod fallback;
pub mod filter;
pub mod loader;
pub mod models;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, ApiError, Endpoint};
pub use cache::MirrorStore;
pub use config::Config;
pub use fallback::Fetched;
pub use loader::Loader;
