//! Pairwise voting engine
//!
//! [`VotingService`] ties the injected store and rating calculator together:
//! the generator enumerates the matchups a user has to judge, the updater
//! resolves a matchup and moves both items' Elo scores in one transaction,
//! and the query helpers report progress and rankings.

pub mod generator;
pub mod queries;
pub mod updater;

use crate::metrics::MetricsCollector;
use crate::rating::RatingCalculator;
use crate::storage::RankingStore;
use std::sync::Arc;
use tracing::warn;

/// The ranking engine
#[derive(Clone)]
pub struct VotingService {
    /// Storage for lists, matchups and ratings
    store: Arc<dyn RankingStore>,
    /// Rating calculator applied to every vote
    calculator: Arc<dyn RatingCalculator>,
    /// Metrics collector for recording generate and vote outcomes
    metrics_collector: Arc<MetricsCollector>,
}

impl VotingService {
    /// Create a new voting service
    pub fn new(store: Arc<dyn RankingStore>, calculator: Arc<dyn RatingCalculator>) -> Self {
        let metrics_collector = Arc::new(MetricsCollector::new().unwrap_or_else(|_| {
            warn!("Failed to create metrics collector, using default");
            MetricsCollector::default()
        }));

        Self::with_metrics(store, calculator, metrics_collector)
    }

    /// Create a new voting service with metrics collector
    pub fn with_metrics(
        store: Arc<dyn RankingStore>,
        calculator: Arc<dyn RatingCalculator>,
        metrics_collector: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            store,
            calculator,
            metrics_collector,
        }
    }

    pub fn store(&self) -> Arc<dyn RankingStore> {
        self.store.clone()
    }

    pub fn calculator(&self) -> Arc<dyn RatingCalculator> {
        self.calculator.clone()
    }

    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics_collector.clone()
    }
}
