//! Common types used throughout the ranking service

use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for users
pub type UserId = i64;

/// Unique identifier for ranking lists
pub type ListId = i64;

/// Unique identifier for list items
pub type ItemId = i64;

/// Unique identifier for matchups
pub type MatchupId = i64;

/// Unique identifier for groups (owned by an external collaborator)
pub type GroupId = i64;

/// Score every item starts from before its first matchup is resolved
pub const DEFAULT_RATING: f64 = 1200.0;

/// Whether a list is shared by a group or private to its creator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Group,
    Personal,
}

/// What kind of things a list ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Book,
    Game,
}

/// Voting lifecycle of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListStatus {
    #[default]
    Open,
    Voting,
    Closed,
}

impl std::fmt::Display for ListStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListStatus::Open => write!(f, "open"),
            ListStatus::Voting => write!(f, "voting"),
            ListStatus::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingList {
    pub id: ListId,
    pub name: String,
    pub list_type: ListType,
    pub media_type: MediaType,
    pub status: ListStatus,
    pub group_id: Option<GroupId>,
    pub created_by_user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRankingList {
    pub name: String,
    pub list_type: ListType,
    pub media_type: MediaType,
    #[serde(default)]
    pub status: ListStatus,
    pub group_id: Option<GroupId>,
    pub created_by_user_id: UserId,
}

/// An entry of a list, e.g. a movie identified by its TMDB id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: ItemId,
    pub list_id: ListId,
    pub external_id: String,
    pub title: String,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewListItem {
    pub external_id: String,
    pub title: String,
    pub metadata: Option<serde_json::Value>,
}

/// Score of one item for one user within one list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub list_id: ListId,
    pub user_id: UserId,
    pub item_id: ItemId,
    pub score: f64,
    /// Number of resolved matchups this rating took part in
    pub matchups_played: u64,
    pub updated_at: DateTime<Utc>,
}

impl Rating {
    /// Create a fresh rating for an item nobody has voted on yet
    pub fn initial(list_id: ListId, user_id: UserId, item_id: ItemId, score: f64) -> Self {
        Self {
            list_id,
            user_id,
            item_id,
            score,
            matchups_played: 0,
            updated_at: current_timestamp(),
        }
    }

    /// Apply a new score and count the matchup
    pub fn update_score(&mut self, score: f64) {
        self.score = score;
        self.matchups_played += 1;
        self.updated_at = current_timestamp();
    }
}

/// A pairwise comparison a user has to judge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub id: MatchupId,
    pub list_id: ListId,
    pub user_id: UserId,
    pub item_a_id: ItemId,
    pub item_b_id: ItemId,
    pub winner_id: Option<ItemId>,
    pub created_at: DateTime<Utc>,
}

impl Matchup {
    pub fn is_resolved(&self) -> bool {
        self.winner_id.is_some()
    }

    pub fn involves(&self, item_id: ItemId) -> bool {
        self.item_a_id == item_id || self.item_b_id == item_id
    }

    /// Unordered key used to detect duplicates
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(self.list_id, self.user_id, self.item_a_id, self.item_b_id)
    }
}

/// Matchup waiting to be inserted; the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMatchup {
    pub list_id: ListId,
    pub user_id: UserId,
    pub item_a_id: ItemId,
    pub item_b_id: ItemId,
}

impl NewMatchup {
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(self.list_id, self.user_id, self.item_a_id, self.item_b_id)
    }
}

/// (list, user, unordered item pair); the lower item id always comes first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    pub list_id: ListId,
    pub user_id: UserId,
    pub low: ItemId,
    pub high: ItemId,
}

impl PairKey {
    pub fn new(list_id: ListId, user_id: UserId, a: ItemId, b: ItemId) -> Self {
        Self {
            list_id,
            user_id,
            low: a.min(b),
            high: a.max(b),
        }
    }
}

/// Result of a generate call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutcome {
    pub created: Vec<Matchup>,
    pub skipped: usize,
}

/// Rating before and after a vote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingChange {
    pub item_id: ItemId,
    pub old_score: f64,
    pub new_score: f64,
    pub delta: f64,
}

/// Result of a vote: the resolved matchup and both updated ratings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub matchup: Matchup,
    pub rating_a: RatingChange,
    pub rating_b: RatingChange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    pub percent: f64,
}

/// Next unresolved matchup together with both of its items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextMatchup {
    pub matchup: Matchup,
    pub item_a: ListItem,
    pub item_b: ListItem,
}

/// An item placed in one user's ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedItem {
    pub rank: usize,
    pub item: ListItem,
    pub score: f64,
    pub matchups_played: u64,
}

/// An item placed in the ranking aggregated over every voter of a list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateRanking {
    pub rank: usize,
    pub item: ListItem,
    pub mean_score: f64,
    pub voters: usize,
}
