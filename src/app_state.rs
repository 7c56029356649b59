//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::LedgerStore;
use crate::service::{PercentileRanker, RevenueAggregator, VolumeAggregator};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Gross gaming revenue per currency.
    pub revenue: Arc<RevenueAggregator>,
    /// Daily wagered volume per currency.
    pub volume: Arc<VolumeAggregator>,
    /// Player percentile ranking.
    pub percentile: Arc<PercentileRanker>,
}

impl AppState {
    /// Wires every aggregator to the same ledger store.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            revenue: Arc::new(RevenueAggregator::new(Arc::clone(&store))),
            volume: Arc::new(VolumeAggregator::new(Arc::clone(&store))),
            percentile: Arc::new(PercentileRanker::new(store)),
        }
    }
}
