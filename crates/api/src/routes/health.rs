//! Health check endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::time::Instant;

use crate::app::AppState;
use crate::error::ApiError;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: DatabaseHealth,
}

/// Database health status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseHealth {
    pub connected: bool,
    pub latency_ms: Option<u64>,
}

/// Simple status response for liveness/readiness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl HealthResponse {
    fn new(connected: bool, latency_ms: u64) -> Self {
        Self {
            status: if connected { "healthy" } else { "unhealthy" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: DatabaseHealth {
                connected,
                latency_ms: connected.then_some(latency_ms),
            },
        }
    }
}

/// Full health check endpoint.
///
/// GET /health
///
/// Pings the backing store; responds 503 with the same body when it is
/// unreachable.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let start = Instant::now();
    let result = state.repository.ping().await;
    let latency_ms = start.elapsed().as_millis() as u64;

    if let Err(err) = &result {
        tracing::warn!(error = %err, "Health check failed to reach the database");
    }

    let response = HealthResponse::new(result.is_ok(), latency_ms);
    let status = if response.database.connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

/// Liveness probe endpoint.
///
/// GET /health/live
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}

/// Readiness probe endpoint.
///
/// GET /health/ready
///
/// Returns 200 OK if the service can accept traffic (database reachable).
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    state
        .repository
        .ping()
        .await
        .map_err(|_| ApiError::ServiceUnavailable("Database is not reachable".to_string()))?;

    Ok(Json(StatusResponse {
        status: "ready".to_string(),
    }))
}
