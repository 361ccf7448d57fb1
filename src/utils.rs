//! Utility functions for the ranking service

use chrono::{DateTime, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Number of unordered pairs among `item_count` items
pub fn pair_count(item_count: usize) -> usize {
    item_count * item_count.saturating_sub(1) / 2
}

/// Percentage of `completed` over `total`, 0 when there is nothing to complete
pub fn progress_percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// Calculate the absolute difference between two ratings
pub fn rating_difference(rating1: f64, rating2: f64) -> f64 {
    (rating1 - rating2).abs()
}
