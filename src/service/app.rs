//! Main application state and service coordination
//!
//! This module contains the production AppState that wires the store, the
//! rating calculator, the voting engine and the metrics collector together.

use crate::config::AppConfig;
use crate::demo::{seed_demo_data, DemoSeed};
use crate::metrics::MetricsCollector;
use crate::rating::EloRatingCalculator;
use crate::storage::{InMemoryRankingStore, RankingStore};
use crate::voting::VotingService;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// Service-level errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Service initialization error: {message}")]
    Initialization { message: String },
}

/// Production application state
pub struct AppState {
    /// Application configuration
    config: AppConfig,

    /// Storage shared by the engine and the health checks
    store: Arc<dyn RankingStore>,

    /// Core ranking engine
    voting: VotingService,

    /// Metrics collector for monitoring
    metrics_collector: Arc<MetricsCollector>,

    /// When the state was created
    started_at: Instant,

    /// Service status
    is_running: Arc<RwLock<bool>>,
}

impl AppState {
    /// Initialize the application with an empty in-memory store
    pub fn new(config: AppConfig) -> Result<Self, ServiceError> {
        Self::with_store(config, Arc::new(InMemoryRankingStore::new()))
    }

    /// Initialize the application on top of an existing store
    pub fn with_store(
        config: AppConfig,
        store: Arc<dyn RankingStore>,
    ) -> Result<Self, ServiceError> {
        info!(
            "Initializing {} ranking service (K={}, initial rating={})",
            config.service.name, config.rating.k_factor, config.rating.initial_rating
        );

        let calculator = EloRatingCalculator::new(config.elo_config()).map_err(|e| {
            ServiceError::Configuration {
                message: e.to_string(),
            }
        })?;

        let metrics_collector =
            Arc::new(
                MetricsCollector::new().map_err(|e| ServiceError::Initialization {
                    message: format!("Failed to create metrics collector: {}", e),
                })?,
            );

        let voting = VotingService::with_metrics(
            store.clone(),
            Arc::new(calculator),
            metrics_collector.clone(),
        );

        Ok(Self {
            config,
            store,
            voting,
            metrics_collector,
            started_at: Instant::now(),
            is_running: Arc::new(RwLock::new(false)),
        })
    }

    /// Populate the store with demo users and lists
    pub fn seed_demo(&self) -> Result<DemoSeed, ServiceError> {
        seed_demo_data(self.store.as_ref()).map_err(|e| ServiceError::Initialization {
            message: format!("Failed to seed demo data: {}", e),
        })
    }

    /// Mark the service as accepting requests
    pub async fn start(&self) {
        *self.is_running.write().await = true;
        info!("{} marked as running", self.config.service.name);
    }

    /// Mark the service as stopped
    pub async fn shutdown(&self) {
        *self.is_running.write().await = false;
        info!("{} marked as stopped", self.config.service.name);
    }

    /// Get application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Check if service is running
    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    pub fn store(&self) -> Arc<dyn RankingStore> {
        self.store.clone()
    }

    pub fn voting(&self) -> &VotingService {
        &self.voting
    }

    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics_collector.clone()
    }

    /// Time since the state was created
    pub fn uptime(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }
}
