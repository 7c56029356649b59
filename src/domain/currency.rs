//! Supported ledger currencies and their static USD rate table.
//!
//! Rates are a point-in-time snapshot applied when a transaction is
//! written. Changing a rate here never affects stored `usd_amount` values.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AnalyticsError;

/// Currency a wager or payout is denominated in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Bitcoin.
    Btc,
    /// Ether.
    Eth,
    /// Tether USD stablecoin.
    Usdt,
}

impl Currency {
    /// Every supported currency, in code order (matches `Ord`).
    pub const ALL: [Self; 3] = [Self::Btc, Self::Eth, Self::Usdt];

    /// Returns the ledger code (e.g. `"ETH"`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Eth => "ETH",
            Self::Btc => "BTC",
            Self::Usdt => "USDT",
        }
    }

    /// Returns how many US dollars one unit of this currency is worth.
    #[must_use]
    pub const fn usd_rate(self) -> Decimal {
        match self {
            Self::Eth => dec!(3000),
            Self::Btc => dec!(50000),
            Self::Usdt => dec!(1),
        }
    }

    /// Converts `amount` to USD, rounded to 2 decimal places.
    #[must_use]
    pub fn to_usd(self, amount: Decimal) -> Decimal {
        (amount * self.usd_rate()).round_dp(2)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ETH" => Ok(Self::Eth),
            "BTC" => Ok(Self::Btc),
            "USDT" => Ok(Self::Usdt),
            other => Err(AnalyticsError::InvalidArgument(format!(
                "unknown currency: {other}"
            ))),
        }
    }
}
