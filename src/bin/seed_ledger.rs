//! seed-ledger: fills the PostgreSQL ledger with synthetic rounds.
//!
//! Scale comes from `SEED_*` environment variables; the connection from
//! `DATABASE_URL`. Exits non-zero if any bulk insert fails.

use std::sync::Arc;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use casino_analytics::config::{AppConfig, SeedConfig};
use casino_analytics::persistence::{LedgerStore, PostgresLedger};
use casino_analytics::seed::BatchLoader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let seed = SeedConfig::from_env();
    tracing::info!(
        rounds = seed.total_rounds,
        users = seed.user_pool_size,
        batch_size = seed.batch_size,
        max_in_flight = seed.max_in_flight,
        "seeding ledger"
    );

    let ledger = Arc::new(PostgresLedger::connect(&config).await?);
    if config.run_migrations {
        ledger.migrate().await?;
    }

    let started = Instant::now();
    let mut loader = BatchLoader::from_config(Arc::clone(&ledger) as Arc<dyn LedgerStore>, &seed);
    let result = loader
        .load(seed.total_rounds, seed.user_pool_size, seed.batch_size)
        .await;
    ledger.close().await;

    match result {
        Ok(report) => {
            tracing::info!(
                events = report.events_inserted,
                batches = report.full_batches,
                partial_flush = report.partial_flush,
                elapsed_ms = started.elapsed().as_millis(),
                "seeding finished"
            );
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "seeding failed");
            Err(err.into())
        }
    }
}
