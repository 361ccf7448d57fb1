//! Vote resolution and Elo rating updates
//!
//! A vote reads the matchup, both ratings and the list inside one store
//! transaction, applies the rating calculator and commits the two new
//! ratings together with the matchup's winner. Either everything is applied
//! or nothing is, and a matchup is resolved at most once.

use crate::error::{RankingError, Result};
use crate::rating::PairOutcome;
use crate::types::{ItemId, ListStatus, MatchupId, Rating, RatingChange, VoteOutcome};
use crate::voting::VotingService;
use tracing::{info, warn};

impl VotingService {
    /// Resolve `matchup_id` in favour of `winner_id`
    pub fn vote(&self, matchup_id: MatchupId, winner_id: ItemId) -> Result<VoteOutcome> {
        let timer = self.metrics_collector.start_timer();

        match self.apply_vote(matchup_id, winner_id) {
            Ok(outcome) => {
                self.metrics_collector.record_vote(timer.stop());
                info!(
                    "Matchup {} resolved: item {} {:.1} -> {:.1}, item {} {:.1} -> {:.1}",
                    matchup_id,
                    outcome.rating_a.item_id,
                    outcome.rating_a.old_score,
                    outcome.rating_a.new_score,
                    outcome.rating_b.item_id,
                    outcome.rating_b.old_score,
                    outcome.rating_b.new_score
                );
                Ok(outcome)
            }
            Err(e) => {
                let reason = rejection_reason(&e);
                self.metrics_collector.record_vote_rejected(reason);
                warn!("Vote on matchup {} rejected ({}): {}", matchup_id, reason, e);
                Err(e)
            }
        }
    }

    fn apply_vote(&self, matchup_id: MatchupId, winner_id: ItemId) -> Result<VoteOutcome> {
        let mut tx = self.store.begin()?;

        let mut matchup = tx
            .matchup_for_update(matchup_id)?
            .ok_or_else(|| RankingError::not_found("Matchup", matchup_id))?;

        if matchup.is_resolved() {
            return Err(RankingError::AlreadyResolved { matchup_id }.into());
        }

        if !matchup.involves(winner_id) {
            return Err(RankingError::InvalidWinner {
                matchup_id,
                winner_id,
            }
            .into());
        }

        if let Some(list) = tx.list(matchup.list_id)? {
            if list.status == ListStatus::Closed {
                return Err(RankingError::ListClosed { list_id: list.id }.into());
            }
        }

        let initial = self.calculator.initial_rating();
        let mut rating_a = tx
            .rating(matchup.list_id, matchup.user_id, matchup.item_a_id)?
            .unwrap_or_else(|| {
                Rating::initial(matchup.list_id, matchup.user_id, matchup.item_a_id, initial)
            });
        let mut rating_b = tx
            .rating(matchup.list_id, matchup.user_id, matchup.item_b_id)?
            .unwrap_or_else(|| {
                Rating::initial(matchup.list_id, matchup.user_id, matchup.item_b_id, initial)
            });

        let outcome = if winner_id == matchup.item_a_id {
            PairOutcome::FirstWins
        } else {
            PairOutcome::SecondWins
        };
        let update = self
            .calculator
            .rate_pair(rating_a.score, rating_b.score, outcome);

        let change_a = score_change(&rating_a, update.first);
        let change_b = score_change(&rating_b, update.second);

        rating_a.update_score(update.first);
        rating_b.update_score(update.second);
        tx.put_rating(rating_a)?;
        tx.put_rating(rating_b)?;

        matchup.winner_id = Some(winner_id);
        tx.update_matchup(matchup.clone())?;

        tx.commit()?;

        Ok(VoteOutcome {
            matchup,
            rating_a: change_a,
            rating_b: change_b,
        })
    }
}

fn score_change(rating: &Rating, new_score: f64) -> RatingChange {
    RatingChange {
        item_id: rating.item_id,
        old_score: rating.score,
        new_score,
        delta: new_score - rating.score,
    }
}

/// Metric label for a failed vote
fn rejection_reason(err: &anyhow::Error) -> &'static str {
    match RankingError::find(err) {
        Some(RankingError::NotFound { .. }) => "not_found",
        Some(RankingError::AlreadyResolved { .. }) => "already_resolved",
        Some(RankingError::InvalidWinner { .. }) => "invalid_winner",
        Some(RankingError::ListClosed { .. }) => "list_closed",
        _ => "internal",
    }
}
