//! Metrics and monitoring for the ranking service
//!
//! This module provides Prometheus metrics collection for matchup generation
//! and voting, served by the HTTP layer on `/metrics`.

pub mod collector;

pub use collector::{MetricsCollector, MetricsTimer, ServiceMetrics, VotingMetrics};
