//! Analytics query parameters and response bodies.
//!
//! Field names keep the ledger API's established camelCase wire format
//! (`ggrUSD`, `totalUSDAmount`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Currency, CurrencyRevenue, DailyVolume, DateRange, UserPercentile};
use crate::error::AnalyticsError;

/// Inclusive date range query, both ends `YYYY-MM-DD`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeParams {
    /// First day of the range (UTC), e.g. `2024-01-01`.
    #[serde(default)]
    pub from: String,
    /// Last day of the range (UTC), inclusive, e.g. `2024-01-31`.
    #[serde(default)]
    pub to: String,
}

impl DateRangeParams {
    /// Validates both dates into a [`DateRange`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidArgument`] on a malformed or
    /// inverted range.
    pub fn to_range(&self) -> Result<DateRange, AnalyticsError> {
        DateRange::parse(&self.from, &self.to)
    }
}

/// GGR of one currency.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RevenueDto {
    /// Currency code.
    pub currency: Currency,
    /// Wagered minus paid out, in `currency`.
    #[schema(value_type = String, example = "250.00")]
    pub ggr: Decimal,
    /// Wagered minus paid out, in USD.
    #[serde(rename = "ggrUSD")]
    #[schema(value_type = String, example = "250.00")]
    pub ggr_usd: Decimal,
}

impl From<CurrencyRevenue> for RevenueDto {
    fn from(row: CurrencyRevenue) -> Self {
        Self {
            currency: row.currency,
            ggr: row.ggr,
            ggr_usd: row.ggr_usd,
        }
    }
}

/// Wagered volume of one (day, currency) bucket.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyVolumeDto {
    /// UTC day, `YYYY-MM-DD`.
    #[schema(example = "2024-01-01")]
    pub day: String,
    /// Currency code.
    pub currency: Currency,
    /// Sum of wagers in `currency`.
    #[serde(rename = "totalAmount")]
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    /// Sum of wagers in USD.
    #[serde(rename = "totalUSDAmount")]
    #[schema(value_type = String)]
    pub total_usd_amount: Decimal,
}

impl From<DailyVolume> for DailyVolumeDto {
    fn from(row: DailyVolume) -> Self {
        Self {
            day: row.day,
            currency: row.currency,
            total_amount: row.total_amount,
            total_usd_amount: row.total_usd_amount,
        }
    }
}

/// A user's wager percentile.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PercentileDto {
    /// Ranked user.
    pub user_id: Uuid,
    /// `rank / totalUsers * 100`.
    #[schema(example = 75.0)]
    pub percentile: f64,
    /// Competition rank, 1 = lowest wagered.
    pub rank: usize,
    /// Users who wagered in the range.
    pub total_users: usize,
    /// Total USD wagered by the user in the range.
    #[serde(rename = "totalUSDAmount")]
    #[schema(value_type = String)]
    pub total_usd_amount: Decimal,
}

impl From<UserPercentile> for PercentileDto {
    fn from(p: UserPercentile) -> Self {
        Self {
            user_id: *p.user_id.as_uuid(),
            percentile: p.percentile,
            rank: p.rank,
            total_users: p.total_users,
            total_usd_amount: p.total_usd_amount,
        }
    }
}

/// Informational body returned instead of rows.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}
