//! Readiness endpoint including the notification bridge.

use axum::{extract::State, http::StatusCode, Json};

use crate::bridge::{HubStatus, NotificationHub};
use pgdemo_common::health::{database_component, ApiHealthResponse, HealthState};

/// State behind `/api/health`.
#[derive(Clone)]
pub struct BridgeHealthState {
    pub health: HealthState,
    pub hub: NotificationHub,
}

/// Detailed API health check endpoint.
///
/// `GET /api/health`
///
/// - `200 OK` if the database is reachable and the bridge is listening
/// - `503 Service Unavailable` otherwise
pub async fn api_health(
    State(state): State<BridgeHealthState>,
) -> (StatusCode, Json<ApiHealthResponse>) {
    let status = state.hub.status().await;
    let subscribers = state.hub.subscriber_count().await;

    let (code, response) = ApiHealthResponse::from_components(
        vec![
            database_component(&state.health.db).await,
            (
                "notifications",
                status.as_str().to_string(),
                status == HubStatus::Open,
            ),
            ("subscribers", subscribers.to_string(), true),
        ],
        state.health.uptime_seconds(),
        env!("CARGO_PKG_VERSION"),
    );

    (code, Json(response))
}
