//! Health check endpoints shared by the demo services.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::db::{health_check as db_health_check, DbPool};

/// State behind the health routes.
#[derive(Clone)]
pub struct HealthState {
    /// Database connection pool
    pub db: DbPool,

    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl HealthState {
    pub fn new(db: DbPool) -> Self {
        Self {
            db,
            start_time: Instant::now(),
        }
    }

    /// Get the server uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Health status ("ok" or "unhealthy")
    pub status: String,
}

/// Detailed health check response for the API.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiHealthResponse {
    /// Overall health status
    pub status: String,

    /// Per-component status ("database", plus service specific entries)
    pub components: BTreeMap<String, String>,

    /// Server uptime in seconds
    pub uptime_seconds: u64,

    /// Server version
    pub version: String,
}

impl ApiHealthResponse {
    /// Build a response; the service is healthy only if every flag is.
    pub fn from_components(
        components: Vec<(&str, String, bool)>,
        uptime_seconds: u64,
        version: &str,
    ) -> (StatusCode, Self) {
        let healthy = components.iter().all(|(_, _, ok)| *ok);
        let components = components
            .into_iter()
            .map(|(name, status, _)| (name.to_string(), status))
            .collect();

        let status_code = if healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        let response = Self {
            status: if healthy { "ok" } else { "unhealthy" }.to_string(),
            components,
            uptime_seconds,
            version: version.to_string(),
        };

        (status_code, response)
    }
}

/// Database component entry for [`ApiHealthResponse::from_components`].
pub async fn database_component(db: &DbPool) -> (&'static str, String, bool) {
    let healthy = db_health_check(db).await;
    let status = if healthy { "connected" } else { "disconnected" };
    ("database", status.to_string(), healthy)
}

/// Basic health check endpoint.
///
/// `GET /health`
///
/// Returns quickly without touching the database; suitable for liveness probes.
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
    })
}

/// Detailed API health check endpoint.
///
/// `GET /api/health`
///
/// - `200 OK` if the database is reachable
/// - `503 Service Unavailable` otherwise
pub async fn api_health(State(state): State<HealthState>) -> (StatusCode, Json<ApiHealthResponse>) {
    let (status, response) = ApiHealthResponse::from_components(
        vec![database_component(&state.db).await],
        state.uptime_seconds(),
        env!("CARGO_PKG_VERSION"),
    );
    (status, Json(response))
}
