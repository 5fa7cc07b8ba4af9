//! Utility functions for number and string formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{
    contains_ignore_case, format_amount, format_count, format_optional, format_price,
    format_value, truncate_string, MISSING,
};
