//! Synthetic wager/payout pair generator.
//!
//! Amounts are drawn in whole cents so every generated value has exactly
//! two decimal places without any float rounding.

use chrono::{DateTime, Months, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::domain::{Currency, RoundId, Transaction, TransactionType, UserId};

/// Smallest wager, in cents (10.00).
const WAGER_MIN_CENTS: i64 = 1_000;
/// Largest wager, in cents (500.00).
const WAGER_MAX_CENTS: i64 = 50_000;
/// Payout delay after the wager, in seconds: `[60, 3600)`.
const PAYOUT_DELAY_SECS: std::ops::Range<i64> = 60..3_600;

/// Produces randomized rounds over the year preceding a reference time.
#[derive(Debug)]
pub struct TransactionGenerator {
    rng: StdRng,
    reference_time: DateTime<Utc>,
}

impl TransactionGenerator {
    /// Creates a generator seeded from OS entropy, anchored at now.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            reference_time: Utc::now(),
        }
    }

    /// Creates a reproducible generator, anchored at now.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            reference_time: Utc::now(),
        }
    }

    /// Creates a generator from an optional seed.
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    /// Anchors the "past year" window at `reference_time` instead of now.
    #[must_use]
    pub fn with_reference_time(mut self, reference_time: DateTime<Utc>) -> Self {
        self.reference_time = reference_time;
        self
    }

    /// Picks one element of `pool` uniformly, or `None` if it is empty.
    pub fn pick<'a, T>(&mut self, pool: &'a [T]) -> Option<&'a T> {
        pool.choose(&mut self.rng)
    }

    /// Generates the wager and payout of one round.
    ///
    /// Both events share `round_id`, `user_id` and a randomly chosen
    /// currency. The payout lands 60 to 3599 seconds after the wager and
    /// pays between half and double the stake.
    pub fn generate_round(
        &mut self,
        round_id: RoundId,
        user_id: UserId,
    ) -> (Transaction, Transaction) {
        let currency = Currency::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Currency::Usdt);

        let wager_time = self.random_time();
        let payout_time = wager_time + TimeDelta::seconds(self.rng.gen_range(PAYOUT_DELAY_SECS));

        let wager_cents = self.rng.gen_range(WAGER_MIN_CENTS..=WAGER_MAX_CENTS);
        let payout_cents = self.payout_cents(wager_cents);

        let wager = Transaction::new(
            wager_time,
            user_id,
            round_id,
            TransactionType::Wager,
            Decimal::new(wager_cents, 2),
            currency,
        );
        let payout = Transaction::new(
            payout_time,
            user_id,
            round_id,
            TransactionType::Payout,
            Decimal::new(payout_cents, 2),
            currency,
        );
        (wager, payout)
    }

    /// Uniform instant within the year before `reference_time`, whole seconds.
    fn random_time(&mut self) -> DateTime<Utc> {
        let window_start = self
            .reference_time
            .checked_sub_months(Months::new(12))
            .unwrap_or(self.reference_time - TimeDelta::days(365));
        let window_secs = (self.reference_time - window_start).num_seconds().max(1);
        window_start + TimeDelta::seconds(self.rng.gen_range(0..window_secs))
    }

    /// Payout in `[0.5 × wager, 2.0 × wager]` cents. A zero or inverted
    /// range collapses to its lower bound.
    fn payout_cents(&mut self, wager_cents: i64) -> i64 {
        let low = (wager_cents + 1) / 2;
        let high = wager_cents.saturating_mul(2);
        if low < high {
            self.rng.gen_range(low..=high)
        } else {
            low.max(0)
        }
    }
}
