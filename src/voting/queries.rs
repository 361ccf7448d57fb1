//! Read-only voting queries: progress, next matchup, scores and rankings

use crate::error::{RankingError, Result};
use crate::types::{
    AggregateRanking, ItemId, ListId, ListItem, Matchup, NextMatchup, Progress, RankedItem,
    RankingList, Rating, User, UserId,
};
use crate::utils::progress_percent;
use crate::voting::VotingService;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

impl VotingService {
    /// How many of the user's matchups for a list are resolved
    pub fn progress(&self, list_id: ListId, user_id: UserId) -> Result<Progress> {
        self.require_list(list_id)?;
        self.require_user(user_id)?;

        let matchups = self.store.list_matchups(list_id, user_id)?;
        let total = matchups.len();
        let completed = matchups.iter().filter(|m| m.is_resolved()).count();

        Ok(Progress {
            total,
            completed,
            percent: progress_percent(completed, total),
        })
    }

    /// First unresolved matchup in creation order, with both items
    pub fn next_matchup(&self, list_id: ListId, user_id: UserId) -> Result<Option<NextMatchup>> {
        self.require_list(list_id)?;
        self.require_user(user_id)?;

        let next = self
            .store
            .list_matchups(list_id, user_id)?
            .into_iter()
            .find(|m| !m.is_resolved());

        let Some(matchup) = next else {
            debug!("No matchups left for list {} user {}", list_id, user_id);
            return Ok(None);
        };

        let item_a = self.require_item(matchup.item_a_id)?;
        let item_b = self.require_item(matchup.item_b_id)?;

        Ok(Some(NextMatchup {
            matchup,
            item_a,
            item_b,
        }))
    }

    /// All of the user's matchups for a list in creation order
    pub fn matchups(&self, list_id: ListId, user_id: UserId) -> Result<Vec<Matchup>> {
        self.require_list(list_id)?;
        self.require_user(user_id)?;
        self.store.list_matchups(list_id, user_id)
    }

    /// Stored ratings of the user for a list, best first
    pub fn scores(&self, list_id: ListId, user_id: UserId) -> Result<Vec<Rating>> {
        self.require_list(list_id)?;
        self.require_user(user_id)?;

        let mut ratings = self.store.list_ratings(list_id, user_id)?;
        ratings.sort_by(|a, b| by_score_desc(a.score, a.item_id, b.score, b.item_id));
        Ok(ratings)
    }

    /// Every item of the list ranked by the user's scores; items without a
    /// rating yet sit at the initial score
    pub fn rankings(&self, list_id: ListId, user_id: UserId) -> Result<Vec<RankedItem>> {
        self.require_list(list_id)?;
        self.require_user(user_id)?;

        let items = self.store.list_items(list_id)?;
        let ratings: HashMap<ItemId, Rating> = self
            .store
            .list_ratings(list_id, user_id)?
            .into_iter()
            .map(|r| (r.item_id, r))
            .collect();
        let initial = self.calculator.initial_rating();

        let mut ranked: Vec<RankedItem> = items
            .into_iter()
            .map(|item| {
                let (score, matchups_played) = ratings
                    .get(&item.id)
                    .map(|r| (r.score, r.matchups_played))
                    .unwrap_or((initial, 0));
                RankedItem {
                    rank: 0,
                    item,
                    score,
                    matchups_played,
                }
            })
            .collect();

        ranked.sort_by(|a, b| by_score_desc(a.score, a.item.id, b.score, b.item.id));
        for (i, entry) in ranked.iter_mut().enumerate() {
            entry.rank = i + 1;
        }

        Ok(ranked)
    }

    /// Ranking of the whole list averaged over every user who voted on it
    pub fn group_results(&self, list_id: ListId) -> Result<Vec<AggregateRanking>> {
        self.require_list(list_id)?;

        let items = self.store.list_items(list_id)?;
        let mut totals: HashMap<ItemId, (f64, usize)> = HashMap::new();
        for rating in self.store.list_all_ratings(list_id)? {
            let entry = totals.entry(rating.item_id).or_insert((0.0, 0));
            entry.0 += rating.score;
            entry.1 += 1;
        }
        let initial = self.calculator.initial_rating();

        let mut results: Vec<AggregateRanking> = items
            .into_iter()
            .map(|item| {
                let (mean_score, voters) = match totals.get(&item.id) {
                    Some(&(sum, count)) => (sum / count as f64, count),
                    None => (initial, 0),
                };
                AggregateRanking {
                    rank: 0,
                    item,
                    mean_score,
                    voters,
                }
            })
            .collect();

        results.sort_by(|a, b| by_score_desc(a.mean_score, a.item.id, b.mean_score, b.item.id));
        for (i, entry) in results.iter_mut().enumerate() {
            entry.rank = i + 1;
        }

        Ok(results)
    }

    fn require_list(&self, list_id: ListId) -> Result<RankingList> {
        self.store
            .get_list(list_id)?
            .ok_or_else(|| RankingError::not_found("List", list_id).into())
    }

    fn require_user(&self, user_id: UserId) -> Result<User> {
        self.store
            .get_user(user_id)?
            .ok_or_else(|| RankingError::not_found("User", user_id).into())
    }

    fn require_item(&self, item_id: ItemId) -> Result<ListItem> {
        self.store
            .get_item(item_id)?
            .ok_or_else(|| RankingError::not_found("Item", item_id).into())
    }
}

/// Higher score first, lower item id first on ties
fn by_score_desc(score_a: f64, id_a: ItemId, score_b: f64, id_b: ItemId) -> Ordering {
    score_b
        .partial_cmp(&score_a)
        .unwrap_or(Ordering::Equal)
        .then(id_a.cmp(&id_b))
}
