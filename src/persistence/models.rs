//! Aggregate rows returned by the ledger store capabilities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Currency, UserId};

/// Conditional sums for one currency over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyTotals {
    /// Group key.
    pub currency: Currency,
    /// Sum of wager `amount`.
    pub total_wagered: Decimal,
    /// Sum of payout `amount`.
    pub total_payout: Decimal,
    /// Sum of wager `usd_amount`.
    pub total_wagered_usd: Decimal,
    /// Sum of payout `usd_amount`.
    pub total_payout_usd: Decimal,
}

/// Wager sums for one UTC day and currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBucket {
    /// UTC calendar day, `YYYY-MM-DD`.
    pub day: String,
    /// Currency of the bucket.
    pub currency: Currency,
    /// Sum of wager `amount`.
    pub total_amount: Decimal,
    /// Sum of wager `usd_amount`.
    pub total_usd_amount: Decimal,
}

/// Total USD wagered by one user over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWagerTotal {
    /// Group key.
    pub user_id: UserId,
    /// Sum of wager `usd_amount`.
    pub total_usd_amount: Decimal,
}
