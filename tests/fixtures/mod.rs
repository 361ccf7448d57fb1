//! Test fixtures and store wrappers for integration testing

#![allow(dead_code)]

use rnkd::error::Result;
use rnkd::rating::EloRatingCalculator;
use rnkd::storage::{InMemoryRankingStore, RankingStore, StoreTransaction};
use rnkd::types::{
    ItemId, ListId, ListItem, ListStatus, ListType, Matchup, MatchupId, MediaType, NewListItem,
    NewMatchup, NewRankingList, NewUser, PairKey, RankingList, Rating, User, UserId,
};
use rnkd::{RankingError, VotingService};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A store holding one user and one list of titled items
pub struct SeededStore {
    pub store: Arc<InMemoryRankingStore>,
    pub user: User,
    pub list: RankingList,
    pub items: Vec<ListItem>,
}

impl SeededStore {
    /// Item with the given title
    pub fn item(&self, title: &str) -> &ListItem {
        self.items
            .iter()
            .find(|item| item.title == title)
            .unwrap_or_else(|| panic!("no item titled {}", title))
    }

    /// Register another voter
    pub fn add_user(&self, name: &str) -> User {
        self.store
            .create_user(NewUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
            })
            .unwrap()
    }

    /// Voting service with the default Elo calculator on top of this store
    pub fn service(&self) -> VotingService {
        service_for(self.store.clone())
    }
}

/// Build a store with a voting group list holding `titles`
pub fn seeded_store(titles: &[&str]) -> SeededStore {
    let store = Arc::new(InMemoryRankingStore::new());
    seed_into(store, titles)
}

/// Seed a user and a list into an existing store
pub fn seed_into(store: Arc<InMemoryRankingStore>, titles: &[&str]) -> SeededStore {
    let user = store
        .create_user(NewUser {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .unwrap();

    let list = store
        .create_list(NewRankingList {
            name: "Favourites".to_string(),
            list_type: ListType::Group,
            media_type: MediaType::Movie,
            status: ListStatus::Voting,
            group_id: Some(1),
            created_by_user_id: user.id,
        })
        .unwrap();

    let items = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            store
                .add_item(
                    list.id,
                    NewListItem {
                        external_id: format!("ext-{}", i),
                        title: title.to_string(),
                        metadata: None,
                    },
                )
                .unwrap()
        })
        .collect();

    SeededStore {
        store,
        user,
        list,
        items,
    }
}

pub fn service_for(store: Arc<dyn RankingStore>) -> VotingService {
    VotingService::new(store, Arc::new(EloRatingCalculator::default()))
}

/// Store whose transactions stage writes normally but refuse to commit
pub struct FailingCommitStore {
    inner: Arc<InMemoryRankingStore>,
    failed_commits: AtomicUsize,
}

impl FailingCommitStore {
    pub fn new(inner: Arc<InMemoryRankingStore>) -> Self {
        Self {
            inner,
            failed_commits: AtomicUsize::new(0),
        }
    }

    pub fn failed_commits(&self) -> usize {
        self.failed_commits.load(Ordering::SeqCst)
    }
}

impl RankingStore for FailingCommitStore {
    fn create_user(&self, user: NewUser) -> Result<User> {
        self.inner.create_user(user)
    }

    fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
        self.inner.get_user(user_id)
    }

    fn create_list(&self, list: NewRankingList) -> Result<RankingList> {
        self.inner.create_list(list)
    }

    fn get_list(&self, list_id: ListId) -> Result<Option<RankingList>> {
        self.inner.get_list(list_id)
    }

    fn update_list_status(&self, list_id: ListId, status: ListStatus) -> Result<RankingList> {
        self.inner.update_list_status(list_id, status)
    }

    fn add_item(&self, list_id: ListId, item: NewListItem) -> Result<ListItem> {
        self.inner.add_item(list_id, item)
    }

    fn get_item(&self, item_id: ItemId) -> Result<Option<ListItem>> {
        self.inner.get_item(item_id)
    }

    fn list_items(&self, list_id: ListId) -> Result<Vec<ListItem>> {
        self.inner.list_items(list_id)
    }

    fn get_matchup(&self, matchup_id: MatchupId) -> Result<Option<Matchup>> {
        self.inner.get_matchup(matchup_id)
    }

    fn list_matchups(&self, list_id: ListId, user_id: UserId) -> Result<Vec<Matchup>> {
        self.inner.list_matchups(list_id, user_id)
    }

    fn list_ratings(&self, list_id: ListId, user_id: UserId) -> Result<Vec<Rating>> {
        self.inner.list_ratings(list_id, user_id)
    }

    fn list_all_ratings(&self, list_id: ListId) -> Result<Vec<Rating>> {
        self.inner.list_all_ratings(list_id)
    }

    fn begin(&self) -> Result<Box<dyn StoreTransaction + '_>> {
        Ok(Box::new(FailingCommitTransaction {
            inner: self.inner.begin()?,
            failed_commits: &self.failed_commits,
        }))
    }
}

struct FailingCommitTransaction<'a> {
    inner: Box<dyn StoreTransaction + 'a>,
    failed_commits: &'a AtomicUsize,
}

impl StoreTransaction for FailingCommitTransaction<'_> {
    fn list(&mut self, list_id: ListId) -> Result<Option<RankingList>> {
        self.inner.list(list_id)
    }

    fn list_items(&mut self, list_id: ListId) -> Result<Vec<ListItem>> {
        self.inner.list_items(list_id)
    }

    fn matchup_for_update(&mut self, matchup_id: MatchupId) -> Result<Option<Matchup>> {
        self.inner.matchup_for_update(matchup_id)
    }

    fn matchup_exists(&mut self, key: &PairKey) -> Result<bool> {
        self.inner.matchup_exists(key)
    }

    fn insert_matchup(&mut self, matchup: NewMatchup) -> Result<Matchup> {
        self.inner.insert_matchup(matchup)
    }

    fn update_matchup(&mut self, matchup: Matchup) -> Result<()> {
        self.inner.update_matchup(matchup)
    }

    fn rating(
        &mut self,
        list_id: ListId,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<Option<Rating>> {
        self.inner.rating(list_id, user_id, item_id)
    }

    fn put_rating(&mut self, rating: Rating) -> Result<()> {
        self.inner.put_rating(rating)
    }

    fn commit(self: Box<Self>) -> Result<()> {
        // Staged writes are dropped together with the inner transaction
        self.failed_commits.fetch_add(1, Ordering::SeqCst);
        Err(RankingError::Storage {
            message: "commit refused".to_string(),
        }
        .into())
    }
}

/// Store whose transactions never report an existing pair up front, so
/// duplicates are only caught when the insert hits the pair index
pub struct UncheckedPairStore {
    inner: Arc<InMemoryRankingStore>,
}

impl UncheckedPairStore {
    pub fn new(inner: Arc<InMemoryRankingStore>) -> Self {
        Self { inner }
    }
}

impl RankingStore for UncheckedPairStore {
    fn create_user(&self, user: NewUser) -> Result<User> {
        self.inner.create_user(user)
    }

    fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
        self.inner.get_user(user_id)
    }

    fn create_list(&self, list: NewRankingList) -> Result<RankingList> {
        self.inner.create_list(list)
    }

    fn get_list(&self, list_id: ListId) -> Result<Option<RankingList>> {
        self.inner.get_list(list_id)
    }

    fn update_list_status(&self, list_id: ListId, status: ListStatus) -> Result<RankingList> {
        self.inner.update_list_status(list_id, status)
    }

    fn add_item(&self, list_id: ListId, item: NewListItem) -> Result<ListItem> {
        self.inner.add_item(list_id, item)
    }

    fn get_item(&self, item_id: ItemId) -> Result<Option<ListItem>> {
        self.inner.get_item(item_id)
    }

    fn list_items(&self, list_id: ListId) -> Result<Vec<ListItem>> {
        self.inner.list_items(list_id)
    }

    fn get_matchup(&self, matchup_id: MatchupId) -> Result<Option<Matchup>> {
        self.inner.get_matchup(matchup_id)
    }

    fn list_matchups(&self, list_id: ListId, user_id: UserId) -> Result<Vec<Matchup>> {
        self.inner.list_matchups(list_id, user_id)
    }

    fn list_ratings(&self, list_id: ListId, user_id: UserId) -> Result<Vec<Rating>> {
        self.inner.list_ratings(list_id, user_id)
    }

    fn list_all_ratings(&self, list_id: ListId) -> Result<Vec<Rating>> {
        self.inner.list_all_ratings(list_id)
    }

    fn begin(&self) -> Result<Box<dyn StoreTransaction + '_>> {
        Ok(Box::new(UncheckedPairTransaction {
            inner: self.inner.begin()?,
        }))
    }
}

struct UncheckedPairTransaction<'a> {
    inner: Box<dyn StoreTransaction + 'a>,
}

impl StoreTransaction for UncheckedPairTransaction<'_> {
    fn list(&mut self, list_id: ListId) -> Result<Option<RankingList>> {
        self.inner.list(list_id)
    }

    fn list_items(&mut self, list_id: ListId) -> Result<Vec<ListItem>> {
        self.inner.list_items(list_id)
    }

    fn matchup_for_update(&mut self, matchup_id: MatchupId) -> Result<Option<Matchup>> {
        self.inner.matchup_for_update(matchup_id)
    }

    fn matchup_exists(&mut self, _key: &PairKey) -> Result<bool> {
        Ok(false)
    }

    fn insert_matchup(&mut self, matchup: NewMatchup) -> Result<Matchup> {
        self.inner.insert_matchup(matchup)
    }

    fn update_matchup(&mut self, matchup: Matchup) -> Result<()> {
        self.inner.update_matchup(matchup)
    }

    fn rating(
        &mut self,
        list_id: ListId,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<Option<Rating>> {
        self.inner.rating(list_id, user_id, item_id)
    }

    fn put_rating(&mut self, rating: Rating) -> Result<()> {
        self.inner.put_rating(rating)
    }

    fn commit(self: Box<Self>) -> Result<()> {
        self.inner.commit()
    }
}
