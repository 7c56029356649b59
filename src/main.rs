//! casino-analytics server entry point.
//!
//! Starts the Axum HTTP server exposing the ledger analytics endpoints.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use casino_analytics::api;
use casino_analytics::app_state::AppState;
use casino_analytics::config::{AppConfig, LedgerBackend};
use casino_analytics::persistence::{InMemoryLedger, LedgerStore, PostgresLedger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        backend = ?config.ledger_backend,
        "starting casino-analytics"
    );

    // Open the ledger
    let mut postgres = None;
    let store: Arc<dyn LedgerStore> = match config.ledger_backend {
        LedgerBackend::Postgres => {
            let ledger = Arc::new(PostgresLedger::connect(&config).await?);
            if config.run_migrations {
                ledger.migrate().await?;
                tracing::info!("database migrations applied");
            }
            postgres = Some(Arc::clone(&ledger));
            ledger
        }
        LedgerBackend::Memory => {
            tracing::warn!("using in-memory ledger; data is lost on shutdown");
            Arc::new(InMemoryLedger::new())
        }
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(store));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(ledger) = postgres {
        ledger.close().await;
    }
    tracing::info!("server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}
