//! PostgreSQL implementation of the ledger store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::LedgerStore;
use super::models::{CurrencyTotals, DailyBucket, UserWagerTotal};
use crate::config::AppConfig;
use crate::domain::{Currency, DateRange, Transaction, UserId};
use crate::error::AnalyticsError;

/// Postgres caps a statement at 65 535 bind parameters; each row binds 8.
const MAX_ROWS_PER_STATEMENT: usize = 8_000;

/// PostgreSQL-backed ledger using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresLedger {
    pool: PgPool,
}

impl PostgresLedger {
    /// Creates a ledger over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool using the database settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::StoreUnavailable`] if the database cannot
    /// be reached.
    pub async fn connect(config: &AppConfig) -> Result<Self, AnalyticsError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        tracing::info!(
            max_connections = config.database_max_connections,
            "connected to ledger database"
        );
        Ok(Self { pool })
    }

    /// Applies the migrations in `./migrations`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::StoreUnavailable`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), AnalyticsError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Closes every connection in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn parse_currency(code: &str) -> Result<Currency, AnalyticsError> {
    code.parse()
        .map_err(|_| AnalyticsError::Internal(format!("unexpected currency in ledger: {code}")))
}

fn bounds(range: &DateRange) -> (DateTime<Utc>, DateTime<Utc>) {
    (range.start(), range.end_exclusive())
}

#[async_trait]
impl LedgerStore for PostgresLedger {
    async fn currency_totals(
        &self,
        range: &DateRange,
    ) -> Result<Vec<CurrencyTotals>, AnalyticsError> {
        let (start, end) = bounds(range);
        let rows = sqlx::query_as::<_, (String, Decimal, Decimal, Decimal, Decimal)>(
            "SELECT currency, \
                    COALESCE(SUM(amount) FILTER (WHERE tx_type = 'Wager'), 0), \
                    COALESCE(SUM(amount) FILTER (WHERE tx_type = 'Payout'), 0), \
                    COALESCE(SUM(usd_amount) FILTER (WHERE tx_type = 'Wager'), 0), \
                    COALESCE(SUM(usd_amount) FILTER (WHERE tx_type = 'Payout'), 0) \
             FROM transactions \
             WHERE created_at >= $1 AND created_at < $2 \
             GROUP BY currency",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(
                |(currency, total_wagered, total_payout, total_wagered_usd, total_payout_usd)| {
                    Ok(CurrencyTotals {
                        currency: parse_currency(&currency)?,
                        total_wagered,
                        total_payout,
                        total_wagered_usd,
                        total_payout_usd,
                    })
                },
            )
            .collect()
    }

    async fn daily_wager_buckets(
        &self,
        range: &DateRange,
    ) -> Result<Vec<DailyBucket>, AnalyticsError> {
        let (start, end) = bounds(range);
        let rows = sqlx::query_as::<_, (String, String, Decimal, Decimal)>(
            "SELECT to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD') AS day, currency, \
                    SUM(amount), SUM(usd_amount) \
             FROM transactions \
             WHERE tx_type = 'Wager' AND created_at >= $1 AND created_at < $2 \
             GROUP BY 1, 2",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(day, currency, total_amount, total_usd_amount)| {
                Ok(DailyBucket {
                    day,
                    currency: parse_currency(&currency)?,
                    total_amount,
                    total_usd_amount,
                })
            })
            .collect()
    }

    async fn user_wager_totals(
        &self,
        range: &DateRange,
    ) -> Result<Vec<UserWagerTotal>, AnalyticsError> {
        let (start, end) = bounds(range);
        let rows = sqlx::query_as::<_, (Uuid, Decimal)>(
            "SELECT user_id, SUM(usd_amount) \
             FROM transactions \
             WHERE tx_type = 'Wager' AND created_at >= $1 AND created_at < $2 \
             GROUP BY user_id",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(user_id, total_usd_amount)| UserWagerTotal {
                user_id: UserId::from_uuid(user_id),
                total_usd_amount,
            })
            .collect())
    }

    async fn insert_batch(&self, events: &[Transaction]) -> Result<u64, AnalyticsError> {
        if events.is_empty() {
            return Ok(0);
        }

        // One transaction per batch so a failed chunk leaves nothing behind.
        let mut db_tx = self.pool.begin().await?;
        let mut written = 0;
        for chunk in events.chunks(MAX_ROWS_PER_STATEMENT) {
            let mut builder = QueryBuilder::<Postgres>::new(
                "INSERT INTO transactions \
                 (id, created_at, user_id, round_id, tx_type, amount, currency, usd_amount) ",
            );
            builder.push_values(chunk, |mut row, tx| {
                row.push_bind(tx.id)
                    .push_bind(tx.created_at)
                    .push_bind(*tx.user_id.as_uuid())
                    .push_bind(*tx.round_id.as_uuid())
                    .push_bind(tx.kind.as_str())
                    .push_bind(tx.amount)
                    .push_bind(tx.currency.code())
                    .push_bind(tx.usd_amount);
            });
            let result = builder.build().execute(&mut *db_tx).await?;
            written += result.rows_affected();
        }
        db_tx.commit().await?;

        Ok(written)
    }
}
