//! Typed analytics results.
//!
//! Each query returns its own record type; none of them are persisted.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{Currency, UserId};

/// Gross gaming revenue for one currency over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyRevenue {
    /// Currency the figures are denominated in.
    pub currency: Currency,
    /// Wagered minus paid out, in `currency`.
    pub ggr: Decimal,
    /// Wagered minus paid out, in USD.
    pub ggr_usd: Decimal,
}

/// Wagered volume for one (day, currency) bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyVolume {
    /// UTC calendar day, `YYYY-MM-DD`.
    pub day: String,
    /// Currency of the bucket.
    pub currency: Currency,
    /// Sum of wager amounts in `currency`.
    pub total_amount: Decimal,
    /// Sum of wager amounts in USD.
    pub total_usd_amount: Decimal,
}

/// Outcome of a daily volume query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeReport {
    /// No wager matched the range.
    NoData,
    /// One row per (day, currency), ordered by day then currency.
    Rows(Vec<DailyVolume>),
}

impl VolumeReport {
    /// Returns the rows, or an empty slice for [`VolumeReport::NoData`].
    #[must_use]
    pub fn rows(&self) -> &[DailyVolume] {
        match self {
            Self::NoData => &[],
            Self::Rows(rows) => rows,
        }
    }
}

/// A user's standing among everyone who wagered in a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPercentile {
    /// Ranked user.
    pub user_id: UserId,
    /// Total USD wagered by the user in the range.
    pub total_usd_amount: Decimal,
    /// Competition rank, 1 = lowest total. Tied users share a rank.
    pub rank: usize,
    /// Number of users who wagered in the range.
    pub total_users: usize,
    /// `rank / total_users * 100`, in `(0, 100]`.
    pub percentile: f64,
}
