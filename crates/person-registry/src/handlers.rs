//! Person API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::db::{Person, PersonEvent};
use crate::services::PersonService;
use pgdemo_common::AppResult;

/// List all persons.
///
/// `GET /`
pub async fn list(State(service): State<PersonService>) -> AppResult<Json<Vec<Person>>> {
    Ok(Json(service.list().await?))
}

/// List all person events.
///
/// `GET /events`
pub async fn list_events(
    State(service): State<PersonService>,
) -> AppResult<Json<Vec<PersonEvent>>> {
    Ok(Json(service.events().await?))
}

/// Find persons by last name.
///
/// `GET /by-name/{last_name}`
pub async fn by_last_name(
    State(service): State<PersonService>,
    Path(last_name): Path<String>,
) -> AppResult<Json<Vec<Person>>> {
    Ok(Json(service.find_by_last_name(&last_name).await?))
}

/// Create a person and record its `CREATED` event.
///
/// `POST /create/{first_name}/{last_name}`
///
/// Responds `200 OK` with an empty body once both rows are written.
pub async fn create(
    State(service): State<PersonService>,
    Path((first_name, last_name)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    service.create(&first_name, &last_name).await?;
    Ok(StatusCode::OK)
}
