//! One renderer per page.

pub mod analytics;
pub mod booking;
pub mod dashboard;
pub mod deals;
pub mod hosts;
pub mod listings;
pub mod predictor;
pub mod travel;
