//! Health check endpoints for Kubernetes probes

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;
use crate::domain::user::UserId;

use super::state::AppState;

/// Health response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
}

/// Health check status
#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Simple health check - returns 200 if the service is running
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Liveness probe - no dependencies checked
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness check - verifies the persistence gateway answers a lookup
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.user_service.find_by_id(UserId::new(0)).await {
        Ok(_) => {
            let response = HealthResponse {
                status: HealthStatus::Healthy,
                version: env!("CARGO_PKG_VERSION").to_string(),
            };
            (StatusCode::OK, Json(response))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Readiness probe failed");
            let response = HealthResponse {
                status: HealthStatus::Unhealthy,
                version: env!("CARGO_PKG_VERSION").to_string(),
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(response))
        }
    }
}
