//! rnkd - pairwise ranking service
//!
//! This crate lets users rank the items of a list by voting on pairs of
//! items. Each vote updates Elo scores per user; the scores order the list
//! and are averaged into a group result.

pub mod config;
pub mod demo;
pub mod error;
pub mod metrics;
pub mod rating;
pub mod service;
pub mod storage;
pub mod types;
pub mod utils;
pub mod voting;

// Re-export commonly used types and traits
pub use error::{RankingError, Result};
pub use types::*;

// Re-export key components
pub use storage::{InMemoryRankingStore, RankingStore, StoreTransaction};
pub use voting::VotingService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
