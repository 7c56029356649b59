//! Persistence layer: the ledger store abstraction and its backends.
//!
//! [`LedgerStore`] names the four capabilities the analytics core needs
//! from storage. [`postgres::PostgresLedger`] is the production backend;
//! [`memory::InMemoryLedger`] evaluates the same queries over a vector and
//! backs the tests and database-less local runs.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::{DateRange, Transaction};
use crate::error::AnalyticsError;
use models::{CurrencyTotals, DailyBucket, UserWagerTotal};

pub use memory::InMemoryLedger;
pub use postgres::PostgresLedger;

/// Storage capabilities consumed by the aggregators and the batch loader.
///
/// Every query filters on `created_at` within `range` (see
/// [`DateRange::start`] and [`DateRange::end_exclusive`]). Row order is
/// unspecified; callers sort.
#[async_trait]
pub trait LedgerStore: Debug + Send + Sync {
    /// Conditional wager/payout sums grouped by currency.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::StoreUnavailable`] on storage failure.
    async fn currency_totals(
        &self,
        range: &DateRange,
    ) -> Result<Vec<CurrencyTotals>, AnalyticsError>;

    /// Wager sums bucketed by UTC day and currency.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::StoreUnavailable`] on storage failure.
    async fn daily_wager_buckets(
        &self,
        range: &DateRange,
    ) -> Result<Vec<DailyBucket>, AnalyticsError>;

    /// Wager USD sums grouped by user.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::StoreUnavailable`] on storage failure.
    async fn user_wager_totals(
        &self,
        range: &DateRange,
    ) -> Result<Vec<UserWagerTotal>, AnalyticsError>;

    /// Bulk-inserts a batch of events, returning the number written.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::StoreUnavailable`] on storage failure.
    async fn insert_batch(&self, events: &[Transaction]) -> Result<u64, AnalyticsError>;
}
