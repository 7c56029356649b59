//! Ledger builders shared by the service tests.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{Currency, DateRange, RoundId, Transaction, TransactionType, UserId};

#[allow(clippy::panic)]
pub(crate) fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    let Some(ts) = Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single() else {
        panic!("valid timestamp");
    };
    ts
}

#[allow(clippy::panic)]
pub(crate) fn range(from: &str, to: &str) -> DateRange {
    let Ok(range) = DateRange::parse(from, to) else {
        panic!("valid range");
    };
    range
}

pub(crate) fn wager(
    user: UserId,
    when: DateTime<Utc>,
    amount: Decimal,
    currency: Currency,
) -> Transaction {
    Transaction::new(
        when,
        user,
        RoundId::new(),
        TransactionType::Wager,
        amount,
        currency,
    )
}

pub(crate) fn payout(
    user: UserId,
    when: DateTime<Utc>,
    amount: Decimal,
    currency: Currency,
) -> Transaction {
    Transaction::new(
        when,
        user,
        RoundId::new(),
        TransactionType::Payout,
        amount,
        currency,
    )
}
