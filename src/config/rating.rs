//! Rating system configuration

use crate::rating::ExtendedEloConfig;
use crate::types::DEFAULT_RATING;
use serde::{Deserialize, Serialize};

/// Elo settings applied to every vote
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Maximum score change per matchup
    pub k_factor: f64,
    /// Score of items that were never rated
    pub initial_rating: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            initial_rating: DEFAULT_RATING,
        }
    }
}

impl From<&RatingConfig> for ExtendedEloConfig {
    fn from(config: &RatingConfig) -> Self {
        Self {
            k_factor: config.k_factor,
            initial_rating: config.initial_rating,
        }
    }
}
