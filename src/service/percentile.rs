//! Player percentile by total USD wagered.
//!
//! Users are ordered ascending by total (lowest wagered = rank 1) using
//! standard competition ranking: a user's rank is one more than the number
//! of users with a strictly lower total, so tied users share a rank and the
//! next distinct total skips ahead ("1, 2, 2, 4").

use std::sync::Arc;

use crate::domain::{DateRange, UserId, UserPercentile};
use crate::error::AnalyticsError;
use crate::persistence::LedgerStore;
use crate::persistence::models::UserWagerTotal;

/// Ranks users by wagered USD and reports a single user's percentile.
#[derive(Debug, Clone)]
pub struct PercentileRanker {
    store: Arc<dyn LedgerStore>,
}

impl PercentileRanker {
    /// Creates a ranker reading from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Computes where `user_id` stands among everyone who wagered in `range`.
    ///
    /// # Errors
    ///
    /// - [`AnalyticsError::NotFound`] if nobody wagered in the range or the
    ///   user placed no wager in it.
    /// - [`AnalyticsError::StoreUnavailable`] if the store query fails.
    pub async fn compute_user_percentile(
        &self,
        user_id: UserId,
        range: &DateRange,
    ) -> Result<UserPercentile, AnalyticsError> {
        let totals = self.store.user_wager_totals(range).await?;
        if totals.is_empty() {
            return Err(AnalyticsError::NotFound(
                "no data found for the specified date range".to_string(),
            ));
        }

        let ranked = rank_user(totals, user_id).ok_or_else(|| {
            AnalyticsError::NotFound(format!("user {user_id} has no wagers in range"))
        })?;

        tracing::debug!(
            %user_id,
            rank = ranked.rank,
            total_users = ranked.total_users,
            percentile = ranked.percentile,
            "computed wager percentile"
        );
        Ok(ranked)
    }
}

/// Sorts `totals` ascending and locates `user_id`.
///
/// Returns `None` if the user is absent.
fn rank_user(mut totals: Vec<UserWagerTotal>, user_id: UserId) -> Option<UserPercentile> {
    totals.sort_by(|a, b| {
        a.total_usd_amount
            .cmp(&b.total_usd_amount)
            .then(a.user_id.cmp(&b.user_id))
    });

    let target = totals.iter().find(|t| t.user_id == user_id)?;
    let lower = totals.partition_point(|t| t.total_usd_amount < target.total_usd_amount);
    let rank = lower + 1;
    let total_users = totals.len();

    #[allow(clippy::cast_precision_loss)]
    let percentile = rank as f64 / total_users as f64 * 100.0;

    Some(UserPercentile {
        user_id,
        total_usd_amount: target.total_usd_amount,
        rank,
        total_users,
        percentile,
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Currency;
    use crate::persistence::InMemoryLedger;
    use crate::service::fixtures::{at, payout, range, wager};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn totals(amounts: &[(UserId, Decimal)]) -> Vec<UserWagerTotal> {
        amounts
            .iter()
            .map(|&(user_id, total_usd_amount)| UserWagerTotal {
                user_id,
                total_usd_amount,
            })
            .collect()
    }

    #[test]
    fn rank_follows_total_not_insertion_order() {
        let top = UserId::new();
        let rows = totals(&[
            (top, dec!(900)),
            (UserId::new(), dec!(10)),
            (UserId::new(), dec!(300)),
            (UserId::new(), dec!(50)),
        ]);
        let Some(ranked) = rank_user(rows, top) else {
            panic!("user should be ranked");
        };
        assert_eq!(ranked.rank, 4);
        assert_eq!(ranked.total_users, 4);
        assert!((ranked.percentile - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ties_share_competition_rank() {
        let (a, b, c, d) = (UserId::new(), UserId::new(), UserId::new(), UserId::new());
        let rows = totals(&[(a, dec!(5)), (b, dec!(20)), (c, dec!(20)), (d, dec!(40))]);

        let ranks: Vec<usize> = [a, b, c, d]
            .iter()
            .filter_map(|&u| rank_user(rows.clone(), u))
            .map(|r| r.rank)
            .collect();
        assert_eq!(ranks, vec![1, 2, 2, 4]);
    }

    #[test]
    fn percentile_is_monotonic_and_bounded() {
        let users: Vec<UserId> = (0..25).map(|_| UserId::new()).collect();
        let rows: Vec<UserWagerTotal> = users
            .iter()
            .enumerate()
            .map(|(i, &user_id)| UserWagerTotal {
                user_id,
                // Users come in groups of three with equal totals.
                total_usd_amount: Decimal::from((i - i % 3) as u64 * 7),
            })
            .collect();

        let mut ranked: Vec<UserPercentile> = users
            .iter()
            .filter_map(|&u| rank_user(rows.clone(), u))
            .collect();
        assert_eq!(ranked.len(), users.len());
        ranked.sort_by_key(|r| r.total_usd_amount);

        for pair in ranked.windows(2) {
            let [lo, hi] = pair else {
                panic!("windows(2) yields pairs");
            };
            assert!(hi.percentile >= lo.percentile);
            if hi.total_usd_amount > lo.total_usd_amount {
                assert!(hi.percentile > lo.percentile);
            }
        }
        for r in &ranked {
            assert!(r.percentile > 0.0 && r.percentile <= 100.0);
            assert!(!r.percentile.is_nan());
        }
    }

    #[test]
    fn absent_user_is_not_ranked() {
        let rows = totals(&[(UserId::new(), dec!(1))]);
        assert!(rank_user(rows, UserId::new()).is_none());
    }

    #[tokio::test]
    async fn computes_percentile_from_wagers_only() {
        let (low, high) = (UserId::new(), UserId::new());
        let ledger = InMemoryLedger::with_events(vec![
            wager(low, at(2024, 4, 1, 0), dec!(10), Currency::Usdt),
            // Payouts never count toward the ranking.
            payout(low, at(2024, 4, 1, 1), dec!(100000), Currency::Usdt),
            wager(high, at(2024, 4, 2, 0), dec!(0.01), Currency::Btc),
        ]);
        let ranker = PercentileRanker::new(Arc::new(ledger));
        let period = range("2024-04-01", "2024-04-30");

        let Ok(low_rank) = ranker.compute_user_percentile(low, &period).await else {
            panic!("low user should be ranked");
        };
        assert_eq!(low_rank.rank, 1);
        assert!((low_rank.percentile - 50.0).abs() < f64::EPSILON);

        let Ok(high_rank) = ranker.compute_user_percentile(high, &period).await else {
            panic!("high user should be ranked");
        };
        assert_eq!(high_rank.total_usd_amount, dec!(500));
        assert!((high_rank.percentile - 100.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn user_without_wagers_in_range_is_not_found() {
        let (active, idle) = (UserId::new(), UserId::new());
        let ledger = InMemoryLedger::with_events(vec![
            wager(active, at(2024, 4, 1, 0), dec!(10), Currency::Usdt),
            wager(idle, at(2024, 6, 1, 0), dec!(10), Currency::Usdt),
        ]);
        let ranker = PercentileRanker::new(Arc::new(ledger));

        let result = ranker
            .compute_user_percentile(idle, &range("2024-04-01", "2024-04-30"))
            .await;
        assert!(matches!(result, Err(AnalyticsError::NotFound(_))));
    }

    #[tokio::test]
    async fn empty_range_is_not_found() {
        let ranker = PercentileRanker::new(Arc::new(InMemoryLedger::new()));
        let result = ranker
            .compute_user_percentile(UserId::new(), &range("2024-04-01", "2024-04-30"))
            .await;
        assert!(matches!(result, Err(AnalyticsError::NotFound(_))));
    }
}
