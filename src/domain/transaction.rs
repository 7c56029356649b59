//! Ledger transaction record.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Currency, RoundId, UserId};

/// Kind of ledger event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Stake placed by the player at the start of a round.
    Wager,
    /// Amount returned to the player when the round settles.
    Payout,
}

impl TransactionType {
    /// Returns the stored discriminator (`"Wager"` or `"Payout"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wager => "Wager",
            Self::Payout => "Payout",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable ledger event.
///
/// `usd_amount` is captured when the event is written and is never
/// recomputed from the rate table afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique event identifier.
    pub id: uuid::Uuid,
    /// When the event happened.
    pub created_at: DateTime<Utc>,
    /// Acting player.
    pub user_id: UserId,
    /// Round shared by exactly one wager and one payout.
    pub round_id: RoundId,
    /// Wager or payout.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Amount in `currency`, non-negative.
    pub amount: Decimal,
    /// Denomination of `amount`.
    pub currency: Currency,
    /// `amount` converted to USD at write time.
    pub usd_amount: Decimal,
}

impl Transaction {
    /// Builds a new event with a fresh id, deriving `usd_amount` from the
    /// rate table.
    #[must_use]
    pub fn new(
        created_at: DateTime<Utc>,
        user_id: UserId,
        round_id: RoundId,
        kind: TransactionType,
        amount: Decimal,
        currency: Currency,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            created_at,
            user_id,
            round_id,
            kind,
            amount,
            currency,
            usd_amount: currency.to_usd(amount),
        }
    }

    /// Returns `true` for wager events.
    #[must_use]
    pub fn is_wager(&self) -> bool {
        self.kind == TransactionType::Wager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_derives_usd_amount() {
        let tx = Transaction::new(
            Utc::now(),
            UserId::new(),
            RoundId::new(),
            TransactionType::Wager,
            dec!(0.25),
            Currency::Eth,
        );
        assert_eq!(tx.usd_amount, dec!(750.00));
        assert!(tx.is_wager());
    }

    #[test]
    fn kind_serializes_as_type_field() {
        let tx = Transaction::new(
            Utc::now(),
            UserId::new(),
            RoundId::new(),
            TransactionType::Payout,
            dec!(1),
            Currency::Usdt,
        );
        let value = serde_json::to_value(&tx).unwrap_or_default();
        assert_eq!(value.get("type").and_then(|v| v.as_str()), Some("Payout"));
    }
}
