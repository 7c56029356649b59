//! Analytics handlers: GGR, daily wager volume, player percentile.

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    DailyVolumeDto, DateRangeParams, MessageResponse, PercentileDto, RevenueDto,
};
use crate::app_state::AppState;
use crate::domain::{UserId, VolumeReport};
use crate::error::{AnalyticsError, ErrorResponse};

/// Body returned by the volume endpoint when nothing was wagered.
pub const NO_DATA_MESSAGE: &str = "No data found for the specified date range";

/// `GET /gross_gaming_rev`: gross gaming revenue per currency.
///
/// # Errors
///
/// Returns [`AnalyticsError`] on an invalid range or store failure.
#[utoipa::path(
    get,
    path = "/api/v1/gross_gaming_rev",
    tag = "Analytics",
    summary = "Gross gaming revenue",
    description = "Wagered minus paid out per currency, in native units and USD. Currencies without activity in the range are omitted.",
    params(DateRangeParams),
    responses(
        (status = 200, description = "GGR per currency", body = Vec<RevenueDto>),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 503, description = "Ledger store unavailable", body = ErrorResponse),
    )
)]
pub async fn gross_gaming_rev(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<Vec<RevenueDto>>, AnalyticsError> {
    let range = params.to_range()?;
    let rows = state.revenue.compute_ggr(&range).await?;
    Ok(Json(rows.into_iter().map(RevenueDto::from).collect()))
}

/// `GET /daily_wager_volume`: wagered volume per day and currency.
///
/// # Errors
///
/// Returns [`AnalyticsError`] on an invalid range or store failure.
#[utoipa::path(
    get,
    path = "/api/v1/daily_wager_volume",
    tag = "Analytics",
    summary = "Daily wager volume",
    description = "Sum of wagers per UTC day and currency, ordered by day then currency. Returns a message body when nothing was wagered in the range.",
    params(DateRangeParams),
    responses(
        (status = 200, description = "Daily buckets, or a no-data message", body = Vec<DailyVolumeDto>),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 503, description = "Ledger store unavailable", body = ErrorResponse),
    )
)]
pub async fn daily_wager_volume(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> Result<Response, AnalyticsError> {
    let range = params.to_range()?;
    let response = match state.volume.compute_daily_volume(&range).await? {
        VolumeReport::NoData => (
            StatusCode::OK,
            Json(MessageResponse {
                message: NO_DATA_MESSAGE.to_string(),
            }),
        )
            .into_response(),
        VolumeReport::Rows(rows) => {
            let body: Vec<DailyVolumeDto> = rows.into_iter().map(DailyVolumeDto::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
    };
    Ok(response)
}

/// `GET /user/{user_id}/wager_percentile`: a user's wager percentile.
///
/// # Errors
///
/// Returns [`AnalyticsError`] on a malformed user id or range, when the
/// user has no wagers in the range, or on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/user/{user_id}/wager_percentile",
    tag = "Analytics",
    summary = "User wager percentile",
    description = "Ranks every user who wagered in the range by total USD wagered (lowest first, ties share a rank) and reports where the given user stands.",
    params(
        ("user_id" = String, Path, description = "User UUID"),
        DateRangeParams,
    ),
    responses(
        (status = 200, description = "User percentile", body = PercentileDto),
        (status = 400, description = "Invalid input, or no wagers for the user in range", body = ErrorResponse),
        (status = 503, description = "Ledger store unavailable", body = ErrorResponse),
    )
)]
pub async fn user_wager_percentile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<PercentileDto>, AnalyticsError> {
    let user_id = UserId::from_str(&user_id)?;
    let range = params.to_range()?;
    let percentile = state
        .percentile
        .compute_user_percentile(user_id, &range)
        .await?;
    Ok(Json(PercentileDto::from(percentile)))
}

/// Analytics routes, mounted under `/api/v1` and at the root.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/gross_gaming_rev", get(gross_gaming_rev))
        .route("/daily_wager_volume", get(daily_wager_volume))
        .route(
            "/user/{user_id}/wager_percentile",
            get(user_wager_percentile),
        )
}
