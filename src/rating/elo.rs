//! Elo rating system implementation
//!
//! This module provides the concrete rating calculator used by the vote path,
//! backed by the Elo implementation from the skillratings crate:
//!
//! ```text
//! expected_a = 1 / (1 + 10^((rating_b - rating_a) / 400))
//! rating_a' = rating_a + K * (actual_a - expected_a)
//! ```

use crate::error::{RankingError, Result};
use crate::rating::calculator::{PairOutcome, PairUpdate, RatingCalculator};
use crate::types::DEFAULT_RATING;
use serde::{Deserialize, Serialize};
use skillratings::elo::{elo, expected_score, EloConfig, EloRating};
use skillratings::Outcomes;

/// Configuration for the Elo rating system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedEloConfig {
    /// Maximum score change per matchup
    pub k_factor: f64,
    /// Score of items that were never rated
    pub initial_rating: f64,
}

impl Default for ExtendedEloConfig {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            initial_rating: DEFAULT_RATING,
        }
    }
}

impl ExtendedEloConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.k_factor > 0.0 && self.k_factor.is_finite()) {
            return Err(RankingError::Configuration {
                message: "K factor must be positive".to_string(),
            }
            .into());
        }

        if !self.initial_rating.is_finite() {
            return Err(RankingError::Configuration {
                message: "Initial rating must be a finite number".to_string(),
            }
            .into());
        }

        Ok(())
    }

    fn elo_config(&self) -> EloConfig {
        EloConfig { k: self.k_factor }
    }
}

/// Elo rating calculator implementation
#[derive(Debug, Clone)]
pub struct EloRatingCalculator {
    config: ExtendedEloConfig,
}

impl EloRatingCalculator {
    /// Create a new Elo rating calculator
    pub fn new(config: ExtendedEloConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn k_factor(&self) -> f64 {
        self.config.k_factor
    }
}

impl Default for EloRatingCalculator {
    fn default() -> Self {
        Self {
            config: ExtendedEloConfig::default(),
        }
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn rate_pair(&self, first: f64, second: f64, outcome: PairOutcome) -> PairUpdate {
        let outcome = match outcome {
            PairOutcome::FirstWins => Outcomes::WIN,
            PairOutcome::SecondWins => Outcomes::LOSS,
        };

        let (first, second) = elo(
            &EloRating { rating: first },
            &EloRating { rating: second },
            &outcome,
            &self.config.elo_config(),
        );

        PairUpdate {
            first: first.rating,
            second: second.rating,
        }
    }

    fn expected_score(&self, first: f64, second: f64) -> f64 {
        let (expected, _) =
            expected_score(&EloRating { rating: first }, &EloRating { rating: second });
        expected
    }

    fn initial_rating(&self) -> f64 {
        self.config.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }
}
