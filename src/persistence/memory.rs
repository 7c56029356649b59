//! In-memory ledger evaluating the store capabilities over a vector.
//!
//! Events live behind a [`tokio::sync::RwLock`]: aggregations take the read
//! lock and run concurrently, bulk inserts take the write lock and append a
//! whole batch at once.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::LedgerStore;
use super::models::{CurrencyTotals, DailyBucket, UserWagerTotal};
use crate::domain::date_range::DATE_FORMAT;
use crate::domain::{Currency, DateRange, Transaction, TransactionType, UserId};
use crate::error::AnalyticsError;

#[derive(Debug, Default)]
struct LedgerState {
    events: Vec<Transaction>,
    batch_sizes: Vec<usize>,
}

/// Ledger held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger pre-populated with `events` (recorded as one batch).
    #[must_use]
    pub fn with_events(events: Vec<Transaction>) -> Self {
        let batch_sizes = vec![events.len()];
        Self {
            state: RwLock::new(LedgerState {
                events,
                batch_sizes,
            }),
        }
    }

    /// Returns a copy of every stored event in insertion order.
    pub async fn events(&self) -> Vec<Transaction> {
        self.state.read().await.events.clone()
    }

    /// Returns the size of each batch accepted so far, in arrival order.
    pub async fn batch_sizes(&self) -> Vec<usize> {
        self.state.read().await.batch_sizes.clone()
    }

    /// Returns `true` if no event has been stored.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.events.is_empty()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn currency_totals(
        &self,
        range: &DateRange,
    ) -> Result<Vec<CurrencyTotals>, AnalyticsError> {
        let state = self.state.read().await;
        let mut groups: HashMap<Currency, CurrencyTotals> = HashMap::new();
        for tx in state.events.iter().filter(|tx| range.contains(tx.created_at)) {
            let totals = groups
                .entry(tx.currency)
                .or_insert_with(|| CurrencyTotals {
                    currency: tx.currency,
                    total_wagered: Decimal::ZERO,
                    total_payout: Decimal::ZERO,
                    total_wagered_usd: Decimal::ZERO,
                    total_payout_usd: Decimal::ZERO,
                });
            match tx.kind {
                TransactionType::Wager => {
                    totals.total_wagered += tx.amount;
                    totals.total_wagered_usd += tx.usd_amount;
                }
                TransactionType::Payout => {
                    totals.total_payout += tx.amount;
                    totals.total_payout_usd += tx.usd_amount;
                }
            }
        }
        Ok(groups.into_values().collect())
    }

    async fn daily_wager_buckets(
        &self,
        range: &DateRange,
    ) -> Result<Vec<DailyBucket>, AnalyticsError> {
        let state = self.state.read().await;
        let mut groups: HashMap<(String, Currency), DailyBucket> = HashMap::new();
        for tx in state
            .events
            .iter()
            .filter(|tx| tx.is_wager() && range.contains(tx.created_at))
        {
            let day = tx.created_at.format(DATE_FORMAT).to_string();
            let bucket = groups
                .entry((day.clone(), tx.currency))
                .or_insert_with(|| DailyBucket {
                    day,
                    currency: tx.currency,
                    total_amount: Decimal::ZERO,
                    total_usd_amount: Decimal::ZERO,
                });
            bucket.total_amount += tx.amount;
            bucket.total_usd_amount += tx.usd_amount;
        }
        Ok(groups.into_values().collect())
    }

    async fn user_wager_totals(
        &self,
        range: &DateRange,
    ) -> Result<Vec<UserWagerTotal>, AnalyticsError> {
        let state = self.state.read().await;
        let mut totals: HashMap<UserId, Decimal> = HashMap::new();
        for tx in state
            .events
            .iter()
            .filter(|tx| tx.is_wager() && range.contains(tx.created_at))
        {
            *totals.entry(tx.user_id).or_insert(Decimal::ZERO) += tx.usd_amount;
        }
        Ok(totals
            .into_iter()
            .map(|(user_id, total_usd_amount)| UserWagerTotal {
                user_id,
                total_usd_amount,
            })
            .collect())
    }

    async fn insert_batch(&self, events: &[Transaction]) -> Result<u64, AnalyticsError> {
        let mut state = self.state.write().await;
        state.events.extend_from_slice(events);
        state.batch_sizes.push(events.len());
        Ok(events.len() as u64)
    }
}
