//! HTTP error mapping
//!
//! Engine failures travel as `anyhow::Error`; the domain cause is looked up
//! with [`RankingError::find`] and turned into a status code and a JSON body
//! of the form `{"error": ..., "code": ...}`.

use crate::error::RankingError;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Error type returned by the HTTP handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A failure raised by the ranking engine or the store
    #[error(transparent)]
    Engine(#[from] anyhow::Error),

    /// A malformed request
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<RankingError> for ApiError {
    fn from(err: RankingError) -> Self {
        ApiError::Engine(err.into())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    /// Status, machine readable code and message for this error
    pub fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Engine(err) => match RankingError::find(err) {
                Some(domain) => classify_ranking_error(domain),
                None => {
                    tracing::error!(error = %err, "Internal error");
                    internal_error()
                }
            },
        }
    }
}

fn classify_ranking_error(err: &RankingError) -> (StatusCode, &'static str, String) {
    match err {
        RankingError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        RankingError::InsufficientItems { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "INSUFFICIENT_ITEMS",
            err.to_string(),
        ),
        RankingError::AlreadyResolved { .. } => {
            (StatusCode::CONFLICT, "ALREADY_RESOLVED", err.to_string())
        }
        RankingError::InvalidWinner { .. } => {
            (StatusCode::BAD_REQUEST, "INVALID_WINNER", err.to_string())
        }
        RankingError::ListClosed { .. } => (StatusCode::CONFLICT, "LIST_CLOSED", err.to_string()),
        RankingError::DuplicateMatchup { .. }
        | RankingError::Storage { .. }
        | RankingError::Configuration { .. } => {
            tracing::error!(error = %err, "Internal ranking error");
            internal_error()
        }
    }
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
