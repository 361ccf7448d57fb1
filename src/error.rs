//! Error types for the ranking service
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application. Domain failures are raised as [`RankingError`]
//! and recovered at the HTTP boundary with `downcast_ref`.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific ranking scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankingError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("List {list_id} has {item_count} item(s); at least 2 are required to generate matchups")]
    InsufficientItems { list_id: i64, item_count: usize },

    #[error("Matchup {matchup_id} has already been voted on")]
    AlreadyResolved { matchup_id: i64 },

    #[error("Item {winner_id} is not part of matchup {matchup_id}")]
    InvalidWinner { matchup_id: i64, winner_id: i64 },

    #[error("Matchup already exists for items {item_a_id} and {item_b_id}")]
    DuplicateMatchup { item_a_id: i64, item_b_id: i64 },

    #[error("List {list_id} is closed for voting")]
    ListClosed { list_id: i64 },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl RankingError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        RankingError::NotFound { entity, id }
    }

    /// Find the domain error inside an `anyhow` chain, if there is one
    pub fn find(err: &anyhow::Error) -> Option<&RankingError> {
        err.chain().find_map(|cause| cause.downcast_ref::<RankingError>())
    }
}
