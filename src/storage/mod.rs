//! Storage interface for users, lists, items, matchups and ratings
//!
//! The ranking engine never touches process-wide state; it talks to an
//! injected [`RankingStore`]. Reads that do not need isolation go straight
//! to the store, while everything that mutates matchups or ratings runs in a
//! [`StoreTransaction`] obtained from [`RankingStore::begin`].

pub mod memory;

pub use memory::{InMemoryRankingStore, InMemoryTransaction};

use crate::error::Result;
use crate::types::{
    ItemId, ListId, ListItem, ListStatus, Matchup, MatchupId, NewListItem, NewMatchup,
    NewRankingList, NewUser, PairKey, RankingList, Rating, User, UserId,
};

/// Trait for ranking storage operations
pub trait RankingStore: Send + Sync {
    /// Register a user
    fn create_user(&self, user: NewUser) -> Result<User>;

    /// Get a user by id
    fn get_user(&self, user_id: UserId) -> Result<Option<User>>;

    /// Create an empty list
    fn create_list(&self, list: NewRankingList) -> Result<RankingList>;

    /// Get a list by id
    fn get_list(&self, list_id: ListId) -> Result<Option<RankingList>>;

    /// Move a list to another voting status
    fn update_list_status(&self, list_id: ListId, status: ListStatus) -> Result<RankingList>;

    /// Append an item to a list
    fn add_item(&self, list_id: ListId, item: NewListItem) -> Result<ListItem>;

    /// Get an item by id
    fn get_item(&self, item_id: ItemId) -> Result<Option<ListItem>>;

    /// Items of a list in creation order
    fn list_items(&self, list_id: ListId) -> Result<Vec<ListItem>>;

    /// Get a matchup by id
    fn get_matchup(&self, matchup_id: MatchupId) -> Result<Option<Matchup>>;

    /// Matchups of one user for one list in creation order
    fn list_matchups(&self, list_id: ListId, user_id: UserId) -> Result<Vec<Matchup>>;

    /// Ratings of one user for one list
    fn list_ratings(&self, list_id: ListId, user_id: UserId) -> Result<Vec<Rating>>;

    /// Ratings of every user for one list
    fn list_all_ratings(&self, list_id: ListId) -> Result<Vec<Rating>>;

    /// Start a transaction. Writes staged in it become visible only on
    /// [`StoreTransaction::commit`]; dropping it discards them.
    fn begin(&self) -> Result<Box<dyn StoreTransaction + '_>>;
}

/// Unit of work over matchups and ratings.
///
/// Implementations must isolate transactions from each other: two
/// transactions that resolve the same matchup may not both observe it as
/// unresolved.
pub trait StoreTransaction {
    /// Get a list by id
    fn list(&mut self, list_id: ListId) -> Result<Option<RankingList>>;

    /// Items of a list in creation order
    fn list_items(&mut self, list_id: ListId) -> Result<Vec<ListItem>>;

    /// Read a matchup with the intent to modify it
    fn matchup_for_update(&mut self, matchup_id: MatchupId) -> Result<Option<Matchup>>;

    /// Whether a matchup already covers this unordered pair
    fn matchup_exists(&mut self, key: &PairKey) -> Result<bool>;

    /// Stage a new matchup. Fails with `RankingError::DuplicateMatchup`
    /// when the pair is already taken.
    fn insert_matchup(&mut self, matchup: NewMatchup) -> Result<Matchup>;

    /// Stage a modified matchup
    fn update_matchup(&mut self, matchup: Matchup) -> Result<()>;

    /// Current rating of an item, `None` if it was never rated
    fn rating(&mut self, list_id: ListId, user_id: UserId, item_id: ItemId)
        -> Result<Option<Rating>>;

    /// Stage an inserted or updated rating
    fn put_rating(&mut self, rating: Rating) -> Result<()>;

    /// Apply every staged write at once
    fn commit(self: Box<Self>) -> Result<()>;
}
