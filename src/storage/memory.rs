//! In-memory ranking store
//!
//! All tables live behind a single `RwLock`. A transaction holds the write
//! guard for its whole lifetime, so transactions are fully serialized and a
//! vote can never observe a matchup another vote is about to resolve.

use crate::error::{RankingError, Result};
use crate::storage::{RankingStore, StoreTransaction};
use crate::types::{
    ItemId, ListId, ListItem, ListStatus, Matchup, MatchupId, NewListItem, NewMatchup,
    NewRankingList, NewUser, PairKey, RankingList, Rating, User, UserId,
};
use crate::utils::current_timestamp;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

type RatingKey = (ListId, UserId, ItemId);

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    lists: BTreeMap<ListId, RankingList>,
    items: BTreeMap<ItemId, ListItem>,
    matchups: BTreeMap<MatchupId, Matchup>,
    pair_index: HashMap<PairKey, MatchupId>,
    ratings: HashMap<RatingKey, Rating>,
    last_user_id: UserId,
    last_list_id: ListId,
    last_item_id: ItemId,
    last_matchup_id: MatchupId,
}

impl Tables {
    fn items_of(&self, list_id: ListId) -> Vec<ListItem> {
        self.items
            .values()
            .filter(|item| item.list_id == list_id)
            .cloned()
            .collect()
    }
}

/// In-memory ranking store implementation
#[derive(Debug, Default)]
pub struct InMemoryRankingStore {
    tables: RwLock<Tables>,
}

impl InMemoryRankingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| {
            RankingError::Storage {
                message: "Failed to acquire store read lock".to_string(),
            }
            .into()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| {
            RankingError::Storage {
                message: "Failed to acquire store write lock".to_string(),
            }
            .into()
        })
    }

    /// Number of matchups across all lists and users
    pub fn matchup_count(&self) -> Result<usize> {
        Ok(self.read()?.matchups.len())
    }

    /// Number of ratings across all lists and users
    pub fn rating_count(&self) -> Result<usize> {
        Ok(self.read()?.ratings.len())
    }
}

impl RankingStore for InMemoryRankingStore {
    fn create_user(&self, user: NewUser) -> Result<User> {
        let mut tables = self.write()?;
        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            name: user.name,
            email: user.email,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
        Ok(self.read()?.users.get(&user_id).cloned())
    }

    fn create_list(&self, list: NewRankingList) -> Result<RankingList> {
        let mut tables = self.write()?;
        tables.last_list_id += 1;
        let list = RankingList {
            id: tables.last_list_id,
            name: list.name,
            list_type: list.list_type,
            media_type: list.media_type,
            status: list.status,
            group_id: list.group_id,
            created_by_user_id: list.created_by_user_id,
        };
        tables.lists.insert(list.id, list.clone());
        Ok(list)
    }

    fn get_list(&self, list_id: ListId) -> Result<Option<RankingList>> {
        Ok(self.read()?.lists.get(&list_id).cloned())
    }

    fn update_list_status(&self, list_id: ListId, status: ListStatus) -> Result<RankingList> {
        let mut tables = self.write()?;
        let list = tables
            .lists
            .get_mut(&list_id)
            .ok_or_else(|| RankingError::not_found("List", list_id))?;
        list.status = status;
        Ok(list.clone())
    }

    fn add_item(&self, list_id: ListId, item: NewListItem) -> Result<ListItem> {
        let mut tables = self.write()?;
        if !tables.lists.contains_key(&list_id) {
            return Err(RankingError::not_found("List", list_id).into());
        }

        tables.last_item_id += 1;
        let item = ListItem {
            id: tables.last_item_id,
            list_id,
            external_id: item.external_id,
            title: item.title,
            metadata: item.metadata,
        };
        tables.items.insert(item.id, item.clone());
        Ok(item)
    }

    fn get_item(&self, item_id: ItemId) -> Result<Option<ListItem>> {
        Ok(self.read()?.items.get(&item_id).cloned())
    }

    fn list_items(&self, list_id: ListId) -> Result<Vec<ListItem>> {
        Ok(self.read()?.items_of(list_id))
    }

    fn get_matchup(&self, matchup_id: MatchupId) -> Result<Option<Matchup>> {
        Ok(self.read()?.matchups.get(&matchup_id).cloned())
    }

    fn list_matchups(&self, list_id: ListId, user_id: UserId) -> Result<Vec<Matchup>> {
        let tables = self.read()?;
        Ok(tables
            .matchups
            .values()
            .filter(|m| m.list_id == list_id && m.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_ratings(&self, list_id: ListId, user_id: UserId) -> Result<Vec<Rating>> {
        let tables = self.read()?;
        Ok(tables
            .ratings
            .values()
            .filter(|r| r.list_id == list_id && r.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_all_ratings(&self, list_id: ListId) -> Result<Vec<Rating>> {
        let tables = self.read()?;
        Ok(tables
            .ratings
            .values()
            .filter(|r| r.list_id == list_id)
            .cloned()
            .collect())
    }

    fn begin(&self) -> Result<Box<dyn StoreTransaction + '_>> {
        let tables = self.write()?;
        Ok(Box::new(InMemoryTransaction::new(tables)))
    }
}

/// Transaction over [`InMemoryRankingStore`], holding its write lock
pub struct InMemoryTransaction<'a> {
    tables: RwLockWriteGuard<'a, Tables>,
    staged_matchups: BTreeMap<MatchupId, Matchup>,
    staged_pairs: HashMap<PairKey, MatchupId>,
    staged_ratings: HashMap<RatingKey, Rating>,
    last_matchup_id: MatchupId,
}

impl<'a> InMemoryTransaction<'a> {
    fn new(tables: RwLockWriteGuard<'a, Tables>) -> Self {
        let last_matchup_id = tables.last_matchup_id;
        Self {
            tables,
            staged_matchups: BTreeMap::new(),
            staged_pairs: HashMap::new(),
            staged_ratings: HashMap::new(),
            last_matchup_id,
        }
    }
}

impl StoreTransaction for InMemoryTransaction<'_> {
    fn list(&mut self, list_id: ListId) -> Result<Option<RankingList>> {
        Ok(self.tables.lists.get(&list_id).cloned())
    }

    fn list_items(&mut self, list_id: ListId) -> Result<Vec<ListItem>> {
        Ok(self.tables.items_of(list_id))
    }

    fn matchup_for_update(&mut self, matchup_id: MatchupId) -> Result<Option<Matchup>> {
        if let Some(matchup) = self.staged_matchups.get(&matchup_id) {
            return Ok(Some(matchup.clone()));
        }
        Ok(self.tables.matchups.get(&matchup_id).cloned())
    }

    fn matchup_exists(&mut self, key: &PairKey) -> Result<bool> {
        Ok(self.staged_pairs.contains_key(key) || self.tables.pair_index.contains_key(key))
    }

    fn insert_matchup(&mut self, matchup: NewMatchup) -> Result<Matchup> {
        let key = matchup.pair_key();
        if self.matchup_exists(&key)? {
            return Err(RankingError::DuplicateMatchup {
                item_a_id: matchup.item_a_id,
                item_b_id: matchup.item_b_id,
            }
            .into());
        }

        self.last_matchup_id += 1;
        let matchup = Matchup {
            id: self.last_matchup_id,
            list_id: matchup.list_id,
            user_id: matchup.user_id,
            item_a_id: matchup.item_a_id,
            item_b_id: matchup.item_b_id,
            winner_id: None,
            created_at: current_timestamp(),
        };

        self.staged_pairs.insert(key, matchup.id);
        self.staged_matchups.insert(matchup.id, matchup.clone());
        Ok(matchup)
    }

    fn update_matchup(&mut self, matchup: Matchup) -> Result<()> {
        let known = self.staged_matchups.contains_key(&matchup.id)
            || self.tables.matchups.contains_key(&matchup.id);
        if !known {
            return Err(RankingError::not_found("Matchup", matchup.id).into());
        }

        self.staged_matchups.insert(matchup.id, matchup);
        Ok(())
    }

    fn rating(
        &mut self,
        list_id: ListId,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<Option<Rating>> {
        let key = (list_id, user_id, item_id);
        if let Some(rating) = self.staged_ratings.get(&key) {
            return Ok(Some(rating.clone()));
        }
        Ok(self.tables.ratings.get(&key).cloned())
    }

    fn put_rating(&mut self, rating: Rating) -> Result<()> {
        self.staged_ratings
            .insert((rating.list_id, rating.user_id, rating.item_id), rating);
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let InMemoryTransaction {
            mut tables,
            staged_matchups,
            staged_pairs,
            staged_ratings,
            last_matchup_id,
        } = *self;

        debug!(
            "Committing {} matchup(s) and {} rating(s)",
            staged_matchups.len(),
            staged_ratings.len()
        );

        tables.pair_index.extend(staged_pairs);
        tables.matchups.extend(staged_matchups);
        tables.ratings.extend(staged_ratings);
        tables.last_matchup_id = last_matchup_id;
        Ok(())
    }
}
