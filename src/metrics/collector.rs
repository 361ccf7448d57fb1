//! Metrics collection using Prometheus
//!
//! This module provides metrics collection for the ranking service using
//! Prometheus metrics.

use anyhow::Result;
use prometheus::{
    Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the ranking service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Service-level metrics
    service_metrics: ServiceMetrics,

    /// Matchup and vote metrics
    voting_metrics: VotingMetrics,
}

/// Service-level metrics
#[derive(Clone)]
pub struct ServiceMetrics {
    /// Service uptime in seconds
    pub uptime_seconds: IntGauge,

    /// Health check status (0=unhealthy, 1=degraded, 2=healthy)
    pub health_status: IntGauge,

    /// Component health status
    pub component_health: IntGaugeVec,
}

/// Matchup generation and vote metrics
#[derive(Clone)]
pub struct VotingMetrics {
    /// Matchups created by generate calls
    pub matchups_created_total: IntCounter,

    /// Pairs skipped by generate calls because a matchup already existed
    pub matchups_skipped_total: IntCounter,

    /// Votes applied
    pub votes_total: IntCounter,

    /// Votes rejected, by reason
    pub vote_rejections_total: IntCounterVec,

    /// Generate call duration
    pub generate_duration: Histogram,

    /// Vote transaction duration
    pub vote_duration: Histogram,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let service_metrics = ServiceMetrics::new(&registry)?;
        let voting_metrics = VotingMetrics::new(&registry)?;

        Ok(Self {
            registry,
            service_metrics,
            voting_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    /// Get service metrics
    pub fn service(&self) -> &ServiceMetrics {
        &self.service_metrics
    }

    /// Get voting metrics
    pub fn voting(&self) -> &VotingMetrics {
        &self.voting_metrics
    }

    /// Record a finished generate call
    pub fn record_generate(&self, created: usize, skipped: usize, duration: Duration) {
        self.voting_metrics
            .matchups_created_total
            .inc_by(created as u64);
        self.voting_metrics
            .matchups_skipped_total
            .inc_by(skipped as u64);
        self.voting_metrics
            .generate_duration
            .observe(duration.as_secs_f64());
    }

    /// Record an applied vote
    pub fn record_vote(&self, duration: Duration) {
        self.voting_metrics.votes_total.inc();
        self.voting_metrics
            .vote_duration
            .observe(duration.as_secs_f64());
    }

    /// Record a rejected vote
    pub fn record_vote_rejected(&self, reason: &str) {
        self.voting_metrics
            .vote_rejections_total
            .with_label_values(&[reason])
            .inc();
    }

    /// Update uptime
    pub fn update_uptime(&self, uptime: Duration) {
        self.service_metrics
            .uptime_seconds
            .set(uptime.as_secs() as i64);
    }

    /// Update health status
    pub fn update_health_status(&self, status: u8) {
        self.service_metrics.health_status.set(status as i64);
    }

    /// Update component health
    pub fn update_component_health(&self, component: &str, healthy: bool) {
        let status = if healthy { 1 } else { 0 };
        self.service_metrics
            .component_health
            .with_label_values(&[component])
            .set(status);
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl ServiceMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let uptime_seconds = IntGauge::new("rnkd_uptime_seconds", "Service uptime in seconds")?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        let health_status = IntGauge::new(
            "rnkd_health_status",
            "Health status (0=unhealthy, 1=degraded, 2=healthy)",
        )?;
        registry.register(Box::new(health_status.clone()))?;

        let component_health = IntGaugeVec::new(
            Opts::new("rnkd_component_health", "Component health status"),
            &["component"],
        )?;
        registry.register(Box::new(component_health.clone()))?;

        Ok(Self {
            uptime_seconds,
            health_status,
            component_health,
        })
    }
}

impl VotingMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let matchups_created_total = IntCounter::new(
            "rnkd_matchups_created_total",
            "Total matchups created by generation",
        )?;
        registry.register(Box::new(matchups_created_total.clone()))?;

        let matchups_skipped_total = IntCounter::new(
            "rnkd_matchups_skipped_total",
            "Total pairs skipped because a matchup already existed",
        )?;
        registry.register(Box::new(matchups_skipped_total.clone()))?;

        let votes_total = IntCounter::new("rnkd_votes_total", "Total votes applied")?;
        registry.register(Box::new(votes_total.clone()))?;

        let vote_rejections_total = IntCounterVec::new(
            Opts::new("rnkd_vote_rejections_total", "Total votes rejected"),
            &["reason"],
        )?;
        registry.register(Box::new(vote_rejections_total.clone()))?;

        let generate_duration = Histogram::with_opts(
            HistogramOpts::new(
                "rnkd_generate_duration_seconds",
                "Matchup generation duration",
            )
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1]),
        )?;
        registry.register(Box::new(generate_duration.clone()))?;

        let vote_duration = Histogram::with_opts(
            HistogramOpts::new("rnkd_vote_duration_seconds", "Vote transaction duration")
                .buckets(vec![0.00001, 0.0001, 0.0005, 0.001, 0.005, 0.01]),
        )?;
        registry.register(Box::new(vote_duration.clone()))?;

        Ok(Self {
            matchups_created_total,
            matchups_skipped_total,
            votes_total,
            vote_rejections_total,
            generate_duration,
            vote_duration,
        })
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create default metrics collector")
    }
}
