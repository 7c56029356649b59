//! Batched, bounded-concurrency ledger seeding.
//!
//! The loader generates rounds on the calling task and hands each full
//! buffer to a fixed pool of insert workers through a bounded queue. The
//! queue capacity equals the worker count, so at most `2 × max_in_flight`
//! batches are ever held in memory. The first failed insert closes the
//! queue; generation stops and the load reports a fatal failure.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;

use super::generator::TransactionGenerator;
use crate::config::SeedConfig;
use crate::domain::{RoundId, Transaction, UserId};
use crate::error::AnalyticsError;
use crate::persistence::LedgerStore;

/// Summary of a completed load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Rounds generated.
    pub rounds: usize,
    /// Events written to the store.
    pub events_inserted: u64,
    /// Batches dispatched because the buffer filled up.
    pub full_batches: usize,
    /// Whether a final, partially filled batch was flushed.
    pub partial_flush: bool,
}

#[derive(Debug)]
struct PendingBatch {
    seq: usize,
    events: Vec<Transaction>,
}

type BatchQueue = Arc<Mutex<mpsc::Receiver<PendingBatch>>>;

/// Seeds a ledger with synthetic rounds.
#[derive(Debug)]
pub struct BatchLoader {
    store: Arc<dyn LedgerStore>,
    generator: TransactionGenerator,
    max_in_flight: usize,
}

impl BatchLoader {
    /// Creates a loader writing to `store` with at most `max_in_flight`
    /// concurrent bulk inserts (minimum 1).
    #[must_use]
    pub fn new(
        store: Arc<dyn LedgerStore>,
        generator: TransactionGenerator,
        max_in_flight: usize,
    ) -> Self {
        Self {
            store,
            generator,
            max_in_flight: max_in_flight.max(1),
        }
    }

    /// Creates a loader from seeding configuration.
    #[must_use]
    pub fn from_config(store: Arc<dyn LedgerStore>, config: &SeedConfig) -> Self {
        Self::new(
            store,
            TransactionGenerator::from_seed(config.rng_seed),
            config.max_in_flight,
        )
    }

    /// Generates `total_rounds` rounds spread over `user_pool_size` users
    /// and inserts them `batch_size` rounds at a time.
    ///
    /// Returns only after every dispatched batch has been written.
    ///
    /// # Errors
    ///
    /// - [`AnalyticsError::InvalidArgument`] if `batch_size` is zero, or
    ///   `user_pool_size` is zero while rounds are requested.
    /// - [`AnalyticsError::FatalLoadFailure`] if any bulk insert fails.
    pub async fn load(
        &mut self,
        total_rounds: usize,
        user_pool_size: usize,
        batch_size: usize,
    ) -> Result<LoadReport, AnalyticsError> {
        if batch_size == 0 {
            return Err(AnalyticsError::InvalidArgument(
                "batch size must be at least 1".to_string(),
            ));
        }
        if user_pool_size == 0 && total_rounds > 0 {
            return Err(AnalyticsError::InvalidArgument(
                "user pool must contain at least one user".to_string(),
            ));
        }

        let users: Vec<UserId> = (0..user_pool_size).map(|_| UserId::new()).collect();
        let events_per_batch = batch_size.saturating_mul(2);

        let (queue_tx, queue_rx) = mpsc::channel::<PendingBatch>(self.max_in_flight);
        let queue_rx: BatchQueue = Arc::new(Mutex::new(queue_rx));
        let aborted = Arc::new(AtomicBool::new(false));

        let mut workers = JoinSet::new();
        for worker in 0..self.max_in_flight {
            workers.spawn(run_worker(
                worker,
                Arc::clone(&queue_rx),
                Arc::clone(&self.store),
                Arc::clone(&aborted),
            ));
        }
        tracing::info!(
            total_rounds,
            user_pool_size,
            batch_size,
            workers = self.max_in_flight,
            "starting ledger load"
        );

        let mut buffer = Vec::with_capacity(events_per_batch);
        let mut full_batches = 0;
        let mut partial_flush = false;
        let mut queue_closed = false;

        for round in 0..total_rounds {
            let Some(&user_id) = self.generator.pick(&users) else {
                break;
            };
            let (wager, payout) = self.generator.generate_round(RoundId::new(), user_id);
            buffer.push(wager);
            buffer.push(payout);

            if buffer.len() >= events_per_batch {
                let events = std::mem::replace(&mut buffer, Vec::with_capacity(events_per_batch));
                full_batches += 1;
                let batch = PendingBatch {
                    seq: full_batches,
                    events,
                };
                if queue_tx.send(batch).await.is_err() {
                    queue_closed = true;
                    break;
                }
                tracing::info!(
                    rounds = round + 1,
                    batches = full_batches,
                    "dispatched batch"
                );
            }
        }

        if !queue_closed && !buffer.is_empty() {
            partial_flush = true;
            let final_len = buffer.len();
            let batch = PendingBatch {
                seq: full_batches + 1,
                events: buffer,
            };
            if queue_tx.send(batch).await.is_ok() {
                tracing::info!(events = final_len, "dispatched final partial batch");
            }
        }
        drop(queue_tx);

        let mut events_inserted = 0;
        let mut failure = None;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok(inserted)) => events_inserted += inserted,
                Ok(Err(err)) => {
                    failure.get_or_insert(err);
                }
                Err(join_err) => {
                    failure.get_or_insert(AnalyticsError::FatalLoadFailure(format!(
                        "insert worker stopped unexpectedly: {join_err}"
                    )));
                }
            }
        }

        if let Some(err) = failure {
            tracing::error!(error = %err, events_inserted, "ledger load aborted");
            return Err(err);
        }

        let report = LoadReport {
            rounds: total_rounds,
            events_inserted,
            full_batches,
            partial_flush,
        };
        tracing::info!(
            rounds = report.rounds,
            events = report.events_inserted,
            batches = report.full_batches,
            partial_flush = report.partial_flush,
            "ledger load complete"
        );
        Ok(report)
    }
}

/// Pulls batches off the shared queue until it is drained or closed.
async fn run_worker(
    worker: usize,
    queue: BatchQueue,
    store: Arc<dyn LedgerStore>,
    aborted: Arc<AtomicBool>,
) -> Result<u64, AnalyticsError> {
    let mut inserted = 0;
    loop {
        let next = queue.lock().await.recv().await;
        let Some(batch) = next else {
            return Ok(inserted);
        };
        if aborted.load(Ordering::Acquire) {
            return Ok(inserted);
        }

        match store.insert_batch(&batch.events).await {
            Ok(rows) => {
                inserted += rows;
                tracing::debug!(worker, batch = batch.seq, rows, "batch inserted");
            }
            Err(err) => {
                aborted.store(true, Ordering::Release);
                queue.lock().await.close();
                tracing::error!(worker, batch = batch.seq, error = %err, "bulk insert failed");
                return Err(AnalyticsError::FatalLoadFailure(format!(
                    "batch {} of {} events failed: {err}",
                    batch.seq,
                    batch.events.len()
                )));
            }
        }
    }
}
