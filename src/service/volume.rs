//! Daily wagered volume per currency.

use std::sync::Arc;

use crate::domain::{DailyVolume, DateRange, VolumeReport};
use crate::error::AnalyticsError;
use crate::persistence::LedgerStore;

/// Buckets wagers by UTC day and currency.
#[derive(Debug, Clone)]
pub struct VolumeAggregator {
    store: Arc<dyn LedgerStore>,
}

impl VolumeAggregator {
    /// Creates an aggregator reading from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Returns wagered totals per (day, currency), ordered by day then
    /// currency, or [`VolumeReport::NoData`] when no wager falls in `range`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::StoreUnavailable`] if the store query fails.
    pub async fn compute_daily_volume(
        &self,
        range: &DateRange,
    ) -> Result<VolumeReport, AnalyticsError> {
        let buckets = self.store.daily_wager_buckets(range).await?;
        if buckets.is_empty() {
            tracing::debug!(from = %range.from_date(), to = %range.to_date(), "no wagers in range");
            return Ok(VolumeReport::NoData);
        }

        let mut rows: Vec<DailyVolume> = buckets
            .into_iter()
            .map(|b| DailyVolume {
                day: b.day,
                currency: b.currency,
                total_amount: b.total_amount,
                total_usd_amount: b.total_usd_amount,
            })
            .collect();
        rows.sort_by(|a, b| a.day.cmp(&b.day).then(a.currency.cmp(&b.currency)));

        Ok(VolumeReport::Rows(rows))
    }
}
