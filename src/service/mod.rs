//! Service layer for the rnkd ranking service
//!
//! This module contains the application state, health checks and the axum
//! HTTP surface of the production service.

pub mod app;
pub mod error;
pub mod health;
pub mod routes;
pub mod server;

pub use app::{AppState, ServiceError};
pub use error::{ApiError, ApiResult};
pub use health::{HealthCheck, HealthStatus};
pub use server::{create_router, HttpServer};
