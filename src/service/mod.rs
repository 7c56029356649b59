//! Service layer: the analytics aggregators.
//!
//! Each aggregator owns an injected [`crate::persistence::LedgerStore`]
//! handle, holds no mutable state, and is safe to share across requests.

pub mod percentile;
pub mod revenue;
pub mod volume;

#[cfg(test)]
pub(crate) mod fixtures;

pub use percentile::PercentileRanker;
pub use revenue::RevenueAggregator;
pub use volume::VolumeAggregator;
