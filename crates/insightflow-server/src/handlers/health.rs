//! Health handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use insightflow_core::InsightProvider;

/// Provider status block
#[derive(Debug, Serialize)]
pub struct ProviderStatus {
    pub backend: &'static str,
    pub model: String,
    pub host: String,
    pub healthy: bool,
}

/// Response for the health endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub provider: ProviderStatus,
}

/// GET /api/health - Server liveness plus provider availability
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let healthy = state.provider.health_check().await;
    Json(HealthResponse {
        status: "ok",
        provider: ProviderStatus {
            backend: state.provider.backend(),
            model: state.provider.model().to_string(),
            host: state.provider.host().to_string(),
            healthy,
        },
    })
}
