//! REST endpoint handlers organized by resource.

pub mod analytics;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all analytics resource routes.
pub fn routes() -> Router<AppState> {
    Router::new().merge(analytics::routes())
}
