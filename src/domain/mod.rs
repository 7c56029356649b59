//! Domain layer: ledger records, identifiers, currencies and result types.
//!
//! Everything here is plain data plus validation. Aggregation lives in
//! [`crate::service`], storage in [`crate::persistence`].

pub mod currency;
pub mod date_range;
pub mod ids;
pub mod reports;
pub mod transaction;

pub use currency::Currency;
pub use date_range::DateRange;
pub use ids::{RoundId, UserId};
pub use reports::{CurrencyRevenue, DailyVolume, UserPercentile, VolumeReport};
pub use transaction::{Transaction, TransactionType};
