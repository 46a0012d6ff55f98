//! Health and sensor state endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use plexhook_sensors::SensorSnapshot;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sensors: usize,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sensors: state.registry.read().await.len(),
    })
}

/// GET /sensors: every sensor with its current occupancy, by name.
pub async fn sensors(State(state): State<Arc<AppState>>) -> Json<Vec<SensorSnapshot>> {
    Json(state.registry.read().await.snapshot())
}
