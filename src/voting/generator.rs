//! Matchup generation
//!
//! Enumerates every unordered pair of a list's items in creation order and
//! creates the matchups the user has not been given yet. Regenerating is
//! idempotent: pairs that already have a matchup are skipped.

use crate::error::{RankingError, Result};
use crate::types::{GenerateOutcome, ListId, ListStatus, NewMatchup, PairKey, UserId};
use crate::utils::pair_count;
use crate::voting::VotingService;
use tracing::{debug, info};

impl VotingService {
    /// Create the missing matchups of `user_id` for `list_id`
    pub fn generate(&self, list_id: ListId, user_id: UserId) -> Result<GenerateOutcome> {
        let timer = self.metrics_collector.start_timer();

        if self.store.get_user(user_id)?.is_none() {
            return Err(RankingError::not_found("User", user_id).into());
        }

        let mut tx = self.store.begin()?;

        let list = tx
            .list(list_id)?
            .ok_or_else(|| RankingError::not_found("List", list_id))?;
        if list.status == ListStatus::Closed {
            return Err(RankingError::ListClosed { list_id }.into());
        }

        let items = tx.list_items(list_id)?;
        if items.len() < 2 {
            return Err(RankingError::InsufficientItems {
                list_id,
                item_count: items.len(),
            }
            .into());
        }

        let mut created = Vec::with_capacity(pair_count(items.len()));
        let mut skipped = 0;

        for (i, item_a) in items.iter().enumerate() {
            for item_b in &items[i + 1..] {
                let key = PairKey::new(list_id, user_id, item_a.id, item_b.id);
                if tx.matchup_exists(&key)? {
                    skipped += 1;
                    continue;
                }

                let new_matchup = NewMatchup {
                    list_id,
                    user_id,
                    item_a_id: item_a.id,
                    item_b_id: item_b.id,
                };
                match tx.insert_matchup(new_matchup) {
                    Ok(matchup) => created.push(matchup),
                    Err(e) if is_duplicate(&e) => {
                        debug!(
                            "Pair ({}, {}) already has a matchup, skipping",
                            item_a.id, item_b.id
                        );
                        skipped += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        tx.commit()?;

        self.metrics_collector
            .record_generate(created.len(), skipped, timer.stop());
        info!(
            "Generated {} matchup(s) for list {} user {} ({} skipped)",
            created.len(),
            list_id,
            user_id,
            skipped
        );

        Ok(GenerateOutcome { created, skipped })
    }
}

fn is_duplicate(err: &anyhow::Error) -> bool {
    matches!(
        RankingError::find(err),
        Some(RankingError::DuplicateMatchup { .. })
    )
}
