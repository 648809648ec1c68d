use std::collections::BTreeMap;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};
use utoipa::ToSchema;

use bp_calc_domain::health::get_system_health;

use crate::api::routes::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// "ok" when every component is healthy, otherwise "error"
    pub status: String,
    /// Application version from the Cargo manifest
    pub version: String,
    /// When the response was generated (RFC 3339)
    pub timestamp: String,
    /// Seconds since the router was built
    pub uptime: u64,
    pub environment: String,
    /// Component name to its status
    pub components: BTreeMap<String, ComponentHealthStatus>,
}

/// Health status for an individual component
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealthStatus {
    /// "healthy" or "unhealthy"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Report service and storage health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Storage is unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let health = get_system_health(state.readings.as_ref()).await;

    let components = health
        .components
        .iter()
        .map(|(name, component)| {
            (
                name.clone(),
                ComponentHealthStatus {
                    status: component.status.as_str().to_string(),
                    message: component.details.clone(),
                },
            )
        })
        .collect();

    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        warn!("Health check failed: {:?}", health.components);
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if health.is_healthy() { "ok" } else { "error" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
        uptime: uptime_seconds(state.started_at),
        environment: state.environment.to_string(),
        components,
    };

    (status, Json(response))
}

fn uptime_seconds(started_at: Instant) -> u64 {
    started_at.elapsed().as_secs()
}
