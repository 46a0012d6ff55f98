//! HTTP router construction.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::state::AppState;

/// Plex attaches a poster thumbnail to some events.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::landing).post(api::webhook))
        .route("/health", get(api::health))
        .route("/sensors", get(api::sensors))
        .route("/sensors/events", get(api::sensor_events))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
