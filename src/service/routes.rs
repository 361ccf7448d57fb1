//! Voting HTTP handlers
//!
//! Thin adapters between axum extractors and [`VotingService`]. Every
//! handler is synchronous underneath; no lock is held across an `.await`.
//!
//! [`VotingService`]: crate::voting::VotingService

use crate::service::app::AppState;
use crate::service::error::ApiResult;
use crate::types::{AggregateRanking, ItemId, ListId, MatchupId, RankedItem, Rating, UserId};
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// `?user_id=` query string
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: UserId,
}

/// `?winner_id=` query string
#[derive(Debug, Deserialize)]
pub struct VoteQuery {
    pub winner_id: ItemId,
}

/// Routes of the voting API, relative to the configured prefix
pub fn voting_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/voting/matchups/{id}", get(list_matchups_handler))
        .route("/voting/matchups/{id}/generate", post(generate_handler))
        .route("/voting/matchups/{id}/vote", post(vote_handler))
        .route("/voting/scores/{list_id}", get(scores_handler))
        .route("/voting/rankings/{list_id}", get(rankings_handler))
        .route("/voting/results/{list_id}", get(results_handler))
        .route("/voting/progress/{list_id}", get(progress_handler))
        .route("/voting/next-matchup/{list_id}", get(next_matchup_handler))
}

fn user_id(query: Result<Query<UserQuery>, QueryRejection>) -> ApiResult<UserId> {
    Ok(query?.0.user_id)
}

async fn generate_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<ListId>, PathRejection>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Path(list_id) = path?;
    let user_id = user_id(query)?;
    debug!("Generate requested for list {} by user {}", list_id, user_id);

    let outcome = state.voting().generate(list_id, user_id)?;

    Ok(Json(json!({
        "message": format!("Generated {} matchups", outcome.created.len()),
        "created_count": outcome.created.len(),
        "skipped": outcome.skipped,
        "matchups": outcome.created,
    })))
}

async fn vote_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<MatchupId>, PathRejection>,
    query: Result<Query<VoteQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Path(matchup_id) = path?;
    let winner_id = query?.0.winner_id;
    debug!("Vote on matchup {} for item {}", matchup_id, winner_id);

    let outcome = state.voting().vote(matchup_id, winner_id)?;

    Ok(Json(json!({
        "message": "Vote submitted successfully",
        "matchup_id": outcome.matchup.id,
        "winner_id": winner_id,
        "rating_a": outcome.rating_a,
        "rating_b": outcome.rating_b,
    })))
}

async fn list_matchups_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<ListId>, PathRejection>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Path(list_id) = path?;
    let user_id = user_id(query)?;
    let matchups = state.voting().matchups(list_id, user_id)?;
    Ok(Json(json!(matchups)))
}

async fn scores_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<ListId>, PathRejection>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Rating>>> {
    let Path(list_id) = path?;
    let user_id = user_id(query)?;
    Ok(Json(state.voting().scores(list_id, user_id)?))
}

async fn rankings_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<ListId>, PathRejection>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<RankedItem>>> {
    let Path(list_id) = path?;
    let user_id = user_id(query)?;
    Ok(Json(state.voting().rankings(list_id, user_id)?))
}

async fn results_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<ListId>, PathRejection>,
) -> ApiResult<Json<Vec<AggregateRanking>>> {
    let Path(list_id) = path?;
    Ok(Json(state.voting().group_results(list_id)?))
}

async fn progress_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<ListId>, PathRejection>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Path(list_id) = path?;
    let user_id = user_id(query)?;
    let progress = state.voting().progress(list_id, user_id)?;

    Ok(Json(json!({
        "total_matchups": progress.total,
        "completed_matchups": progress.completed,
        "progress_percentage": progress.percent,
    })))
}

async fn next_matchup_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<ListId>, PathRejection>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Path(list_id) = path?;
    let user_id = user_id(query)?;

    let body = match state.voting().next_matchup(list_id, user_id)? {
        Some(next) => json!({
            "matchup": next.matchup,
            "item_a": next.item_a,
            "item_b": next.item_b,
        }),
        None => json!({ "message": "No more matchups available" }),
    };

    Ok(Json(body))
}
