//! Analytics error types with HTTP status code mapping.
//!
//! [`AnalyticsError`] is the central error type for the crate. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid argument: invalid 'from' date"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error enum shared by the aggregators, the loader and the HTTP layer.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status                 |
/// |-----------|------------|-----------------------------|
/// | 1000–1999 | Validation | 400 Bad Request             |
/// | 2000–2999 | Not Found  | 400 Bad Request             |
/// | 3000–3999 | Server     | 500 / 503                   |
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// Malformed date, inverted range, malformed identifier or bad scale
    /// parameter. Never retried.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The query was valid but produced no matching aggregate row.
    #[error("not found: {0}")]
    NotFound(String),

    /// The ledger store failed to answer an aggregation or insert.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// A bulk insert failed while seeding; the load was aborted.
    #[error("ledger load aborted: {0}")]
    FatalLoadFailure(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AnalyticsError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidArgument(_) => 1001,
            Self::NotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::StoreUnavailable(_) => 3001,
            Self::FatalLoadFailure(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) | Self::NotFound(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::FatalLoadFailure(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AnalyticsError {
    fn from(err: sqlx::Error) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AnalyticsError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::StoreUnavailable(format!("migration failed: {err}"))
    }
}

impl IntoResponse for AnalyticsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
