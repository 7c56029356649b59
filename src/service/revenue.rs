//! Gross gaming revenue per currency.

use std::sync::Arc;

use crate::domain::{CurrencyRevenue, DateRange};
use crate::error::AnalyticsError;
use crate::persistence::LedgerStore;

/// Computes GGR (wagered minus paid out) grouped by currency.
#[derive(Debug, Clone)]
pub struct RevenueAggregator {
    store: Arc<dyn LedgerStore>,
}

impl RevenueAggregator {
    /// Creates an aggregator reading from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Returns one row per currency seen in `range`, sorted by currency.
    ///
    /// A range with no transactions yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::StoreUnavailable`] if the store query fails.
    pub async fn compute_ggr(
        &self,
        range: &DateRange,
    ) -> Result<Vec<CurrencyRevenue>, AnalyticsError> {
        let totals = self.store.currency_totals(range).await?;

        let mut rows: Vec<CurrencyRevenue> = totals
            .into_iter()
            .map(|t| CurrencyRevenue {
                currency: t.currency,
                ggr: t.total_wagered - t.total_payout,
                ggr_usd: t.total_wagered_usd - t.total_payout_usd,
            })
            .collect();
        rows.sort_by_key(|row| row.currency);

        tracing::debug!(
            from = %range.from_date(),
            to = %range.to_date(),
            currencies = rows.len(),
            "computed gross gaming revenue"
        );
        Ok(rows)
    }
}
