//! Login API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::db::LoginEvent;
use crate::state::AppState;
use pgdemo_common::AppResult;

/// Query parameters for listing logins.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Only logins of this user
    pub username: Option<String>,
}

/// Record a login.
///
/// `POST /login/{username}`
///
/// Responds `200 OK` with an empty body once the row is written. The
/// database trigger then publishes the username on the notification channel.
pub async fn login(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<StatusCode> {
    state.logins.login(&username).await?;
    Ok(StatusCode::OK)
}

/// List recorded logins.
///
/// `GET /login?username=alice`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<LoginEvent>>> {
    let events = state.logins.list(params.username.as_deref()).await?;
    Ok(Json(events))
}
