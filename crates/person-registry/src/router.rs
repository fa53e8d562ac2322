//! Route table for the person registry.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::PersonService;
use pgdemo_common::health::{self, HealthState};

/// Person routes.
pub fn routes(service: PersonService) -> Router {
    Router::new()
        .route("/", get(handlers::list))
        .route("/events", get(handlers::list_events))
        .route("/by-name/{last_name}", get(handlers::by_last_name))
        .route("/create/{first_name}/{last_name}", post(handlers::create))
        .with_state(service)
}

/// Health check routes (no auth required).
pub fn health_routes(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/health", get(health::api_health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    use crate::db::{Person, PersonEvent};
    use pgdemo_common::InMemoryRepository;

    fn app() -> Router {
        routes(PersonService::new(
            Arc::new(InMemoryRepository::<Person>::new()),
            Arc::new(InMemoryRepository::<PersonEvent>::new()),
        ))
    }

    async fn send(router: &Router, method: &str, uri: &str) -> Response {
        router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_query() {
        let router = app();

        let response = send(&router, "POST", "/create/Grace/Hopper").await;
        assert_eq!(response.status(), StatusCode::OK);
        send(&router, "POST", "/create/Alan/Turing").await;

        let all: Vec<Person> = json(send(&router, "GET", "/").await).await;
        assert_eq!(all.len(), 2);

        let hoppers: Vec<Person> = json(send(&router, "GET", "/by-name/Hopper").await).await;
        assert_eq!(hoppers.len(), 1);
        assert_eq!(hoppers[0].first_name, "Grace");

        let events: Vec<PersonEvent> = json(send(&router, "GET", "/events").await).await;
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.action == "CREATED"));
    }

    #[tokio::test]
    async fn test_by_name_without_match_is_empty_list() {
        let router = app();
        let response = send(&router, "GET", "/by-name/Nobody").await;
        assert_eq!(response.status(), StatusCode::OK);
        let found: Vec<Person> = json(response).await;
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_blank_name_is_unprocessable() {
        let router = app();
        let response = send(&router, "POST", "/create/%20/Hopper").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_overlong_name_is_unprocessable() {
        let router = app();
        let uri = format!("/create/{}/Hopper", "g".repeat(256));
        let response = send(&router, "POST", &uri).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let all: Vec<Person> = json(send(&router, "GET", "/").await).await;
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_post() {
        let router = app();
        let response = send(&router, "GET", "/create/Grace/Hopper").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
