//! Collaborators handed to the orchestrator

use crate::core::clock::Clock;
use crate::metrics::Metrics;
use crate::services::discovery::UniverseDiscovery;
use crate::services::market_data::{FundamentalsProvider, PriceHistoryProvider};
use crate::services::notifier::Notifier;
use std::sync::Arc;

/// External collaborators used by one orchestrator.
///
/// Everything is behind a trait object so tests can swap in recorded
/// responses and a fixed clock.
#[derive(Clone)]
pub struct AdvisorContext {
    pub prices: Arc<dyn PriceHistoryProvider>,
    pub fundamentals: Arc<dyn FundamentalsProvider>,
    pub discovery: Arc<dyn UniverseDiscovery>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
    pub metrics: Option<Arc<Metrics>>,
}

impl AdvisorContext {
    pub fn new(
        prices: Arc<dyn PriceHistoryProvider>,
        fundamentals: Arc<dyn FundamentalsProvider>,
        discovery: Arc<dyn UniverseDiscovery>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            prices,
            fundamentals,
            discovery,
            notifier,
            clock,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }
}
