//! Rating calculator trait
//!
//! This module defines the interface the vote path uses to turn a resolved
//! matchup into new item scores, independent of the concrete rating system.

use serde::{Deserialize, Serialize};

/// Which side of a matchup won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairOutcome {
    FirstWins,
    SecondWins,
}

/// New scores of both sides after a pairwise comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairUpdate {
    pub first: f64,
    pub second: f64,
}

/// Trait for calculating rating changes after a pairwise comparison
pub trait RatingCalculator: Send + Sync {
    /// Calculate both new scores
    ///
    /// # Arguments
    /// * `first` - Current score of the first item
    /// * `second` - Current score of the second item
    /// * `outcome` - Which of the two won
    fn rate_pair(&self, first: f64, second: f64, outcome: PairOutcome) -> PairUpdate;

    /// Probability that `first` beats `second`
    fn expected_score(&self, first: f64, second: f64) -> f64;

    /// Score given to items that were never rated
    fn initial_rating(&self) -> f64;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

/// Rating calculator that never changes scores, for tests or dry runs
#[derive(Debug, Clone)]
pub struct NoOpRatingCalculator {
    initial_rating: f64,
}

impl NoOpRatingCalculator {
    pub fn new(initial_rating: f64) -> Self {
        Self { initial_rating }
    }
}

impl Default for NoOpRatingCalculator {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_RATING)
    }
}

impl RatingCalculator for NoOpRatingCalculator {
    fn rate_pair(&self, first: f64, second: f64, _outcome: PairOutcome) -> PairUpdate {
        PairUpdate { first, second }
    }

    fn expected_score(&self, _first: f64, _second: f64) -> f64 {
        0.5
    }

    fn initial_rating(&self) -> f64 {
        self.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "no_op",
            "initial_rating": self.initial_rating,
        })
    }
}
