//! Rating system integration using the Elo algorithm
//!
//! This module provides rating calculations and integration with the
//! skillratings crate for pairwise item comparisons.

pub mod calculator;
pub mod elo;

// Re-export commonly used types
pub use calculator::{NoOpRatingCalculator, PairOutcome, PairUpdate, RatingCalculator};
pub use elo::{EloRatingCalculator, ExtendedEloConfig};
