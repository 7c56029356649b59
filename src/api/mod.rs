//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Analytics endpoints are mounted under `/api/v1` and, unversioned, at
//! the root where the ledger API has always served them. `/health` and
//! the Swagger UI sit at the root.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Casino Analytics API",
        description = "Gross gaming revenue, daily wager volume and player percentile over the transaction ledger."
    ),
    tags(
        (name = "System", description = "Service health"),
        (name = "Analytics", description = "Ledger aggregations over a date range")
    ),
    paths(
        handlers::system::health_handler,
        handlers::analytics::gross_gaming_rev,
        handlers::analytics::daily_wager_volume,
        handlers::analytics::user_wager_percentile,
    ),
    components(schemas(
        dto::RevenueDto,
        dto::DailyVolumeDto,
        dto::PercentileDto,
        dto::MessageResponse,
        handlers::system::HealthResponse,
        crate::domain::Currency,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
    ))
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::{Currency, Transaction, UserId};
    use crate::persistence::InMemoryLedger;
    use crate::service::fixtures::{at, payout, wager};

    const MARCH: &str = "from=2024-03-01&to=2024-03-31";

    fn app(events: Vec<Transaction>) -> Router {
        let store = Arc::new(InMemoryLedger::with_events(events));
        build_router().with_state(AppState::new(store))
    }

    fn decimal(value: &Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn ggr_uses_wire_field_names() {
        let user = UserId::new();
        let app = app(vec![
            wager(user, at(2024, 3, 1, 12), dec!(1000), Currency::Usdt),
            payout(user, at(2024, 3, 1, 13), dec!(750), Currency::Usdt),
        ]);

        let (status, body) = get(app, &format!("/api/v1/gross_gaming_rev?{MARCH}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["currency"], "USDT");
        assert_eq!(decimal(&body[0]["ggr"]), dec!(250));
        assert_eq!(decimal(&body[0]["ggrUSD"]), dec!(250));
    }

    #[tokio::test]
    async fn analytics_are_also_served_unversioned() {
        let user = UserId::new();
        let events = vec![wager(user, at(2024, 3, 2, 12), dec!(5), Currency::Usdt)];

        let uri = format!("/gross_gaming_rev?{MARCH}");
        let (status, body) = get(app(events.clone()), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body[0]["ggr"]), dec!(5));

        let uri = format!("/daily_wager_volume?{MARCH}");
        let (status, body) = get(app(events.clone()), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["day"], "2024-03-02");

        let uri = format!("/user/{user}/wager_percentile?{MARCH}");
        let (status, body) = get(app(events), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rank"], 1);
    }

    #[tokio::test]
    async fn empty_volume_returns_message() {
        let uri = format!("/api/v1/daily_wager_volume?{MARCH}");
        let (status, body) = get(app(Vec::new()), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], handlers::analytics::NO_DATA_MESSAGE);
    }

    #[tokio::test]
    async fn volume_rows_carry_usd_totals() {
        let user = UserId::new();
        let events = vec![wager(user, at(2024, 3, 2, 12), dec!(0.5), Currency::Eth)];
        let app = app(events);

        let (status, body) = get(app, &format!("/api/v1/daily_wager_volume?{MARCH}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["day"], "2024-03-02");
        assert_eq!(decimal(&body[0]["totalAmount"]), dec!(0.5));
        assert_eq!(decimal(&body[0]["totalUSDAmount"]), dec!(1500));
    }

    #[tokio::test]
    async fn percentile_for_known_user() {
        let (low, high) = (UserId::new(), UserId::new());
        let app = app(vec![
            wager(low, at(2024, 3, 3, 12), dec!(10), Currency::Usdt),
            wager(high, at(2024, 3, 3, 12), dec!(20), Currency::Usdt),
        ]);

        let uri = format!("/api/v1/user/{low}/wager_percentile?{MARCH}");
        let (status, body) = get(app, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["percentile"], 50.0);
        assert_eq!(body["rank"], 1);
        assert_eq!(body["totalUsers"], 2);
    }

    #[tokio::test]
    async fn unknown_user_is_bad_request() {
        let (someone, stranger) = (UserId::new(), UserId::new());
        let events = vec![wager(someone, at(2024, 3, 3, 12), dec!(10), Currency::Usdt)];
        let app = app(events);

        let uri = format!("/api/v1/user/{stranger}/wager_percentile?{MARCH}");
        let (status, body) = get(app, &uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 2001);
    }

    #[tokio::test]
    async fn malformed_inputs_are_rejected() {
        let cases = [
            "/api/v1/gross_gaming_rev?from=2024-13-01&to=2024-03-31",
            "/api/v1/gross_gaming_rev?to=2024-03-31",
            "/api/v1/daily_wager_volume?from=2024-03-31&to=2024-03-01",
            "/api/v1/user/not-a-uuid/wager_percentile?from=2024-03-01&to=2024-03-31",
        ];
        for uri in cases {
            let (status, body) = get(app(Vec::new()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"]["code"], 1001, "{uri}");
        }
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let (status, body) = get(app(Vec::new()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[test]
    fn openapi_lists_analytics_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/v1/gross_gaming_rev",
            "/api/v1/daily_wager_volume",
            "/api/v1/user/{user_id}/wager_percentile",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
    }
}
