//! Route table for the login service.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::handlers::health::BridgeHealthState;
use crate::state::AppState;
use pgdemo_common::health;

/// Login and stream routes.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/login", get(handlers::login::list))
        .route("/login/{username}", post(handlers::login::login))
        .route("/login-stream", get(handlers::login_stream))
        .with_state(state)
}

/// Health check routes (no auth required).
pub fn health_routes(state: BridgeHealthState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/health", get(handlers::health::api_health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use futures::StreamExt;
    use tower::ServiceExt;

    use crate::bridge::{NotificationHub, NotificationMessage};
    use crate::config::DEFAULT_CHANNEL;
    use crate::db::{LoginEvent, LoginEventRepository, NewLoginEvent};
    use crate::services::LoginService;
    use pgdemo_common::{AppResult, CrudRepository, InMemoryRepository};

    /// In-memory repository that publishes the username after each insert,
    /// the way the database trigger does.
    struct TriggeringRepository {
        rows: InMemoryRepository<LoginEvent>,
        hub: NotificationHub,
    }

    #[async_trait]
    impl CrudRepository for TriggeringRepository {
        type Entity = LoginEvent;

        async fn save(&self, draft: NewLoginEvent) -> AppResult<LoginEvent> {
            let event = self.rows.save(draft).await?;
            self.hub
                .broadcast(NotificationMessage::new(DEFAULT_CHANNEL, event.username.clone()))
                .await;
            Ok(event)
        }

        async fn find_all(&self) -> AppResult<Vec<LoginEvent>> {
            self.rows.find_all().await
        }
    }

    #[async_trait]
    impl LoginEventRepository for TriggeringRepository {
        async fn find_all_by_username(&self, username: &str) -> AppResult<Vec<LoginEvent>> {
            self.rows.find_all_by_username(username).await
        }
    }

    fn app() -> (Router, NotificationHub) {
        let hub = NotificationHub::new();
        let repository = TriggeringRepository {
            rows: InMemoryRepository::new(),
            hub: hub.clone(),
        };
        let state = AppState::new(
            LoginService::new(Arc::new(repository)),
            hub.clone(),
            Duration::from_secs(60),
        );
        (routes(state), hub)
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

    /// Next SSE frame that carries data, as text.
    async fn next_frame(stream: &mut axum::body::BodyDataStream) -> Option<String> {
        loop {
            let chunk = tokio::time::timeout(Duration::from_secs(1), stream.next())
                .await
                .ok()??
                .ok()?;
            let text = String::from_utf8_lossy(&chunk).to_string();
            if text.contains("data:") {
                return Some(text);
            }
        }
    }

    #[tokio::test]
    async fn test_login_returns_empty_ok() {
        let (router, _) = app();
        let response = send(&router, "POST", "/login/alice").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_by_username() {
        let (router, _) = app();
        send(&router, "POST", "/login/alice").await;
        send(&router, "POST", "/login/bob").await;

        let response = send(&router, "GET", "/login?username=bob").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let events: Vec<LoginEvent> = serde_json::from_slice(&body).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].username, "bob");
        assert_eq!(events[0].id, 2);
    }

    #[tokio::test]
    async fn test_stream_receives_login_made_after_attach() {
        let (router, _) = app();
        let response = send(&router, "GET", "/login-stream").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "text/event-stream"
        );
        let mut stream = response.into_body().into_data_stream();

        send(&router, "POST", "/login/alice").await;

        let frame = next_frame(&mut stream).await.unwrap();
        assert!(frame.contains("data: alice"));
    }

    #[tokio::test]
    async fn test_late_stream_gets_no_replay() {
        let (router, _) = app();
        let mut early = send(&router, "GET", "/login-stream")
            .await
            .into_body()
            .into_data_stream();

        send(&router, "POST", "/login/alice").await;
        assert!(next_frame(&mut early).await.unwrap().contains("data: alice"));

        let mut late = send(&router, "GET", "/login-stream")
            .await
            .into_body()
            .into_data_stream();
        send(&router, "POST", "/login/bob").await;

        assert!(next_frame(&mut late).await.unwrap().contains("data: bob"));
        assert!(next_frame(&mut early).await.unwrap().contains("data: bob"));
    }

    #[tokio::test]
    async fn test_closed_stream_does_not_disturb_others() {
        let (router, hub) = app();
        let first = send(&router, "GET", "/login-stream").await;
        let mut second = send(&router, "GET", "/login-stream")
            .await
            .into_body()
            .into_data_stream();
        assert_eq!(hub.subscriber_count().await, 2);

        drop(first);
        send(&router, "POST", "/login/carol").await;

        assert!(next_frame(&mut second).await.unwrap().contains("data: carol"));
        assert_eq!(hub.subscriber_count().await, 1);
    }

    #[tokio::test]
    async fn test_carriage_return_in_payload_splits_data_lines() {
        let (router, hub) = app();
        let mut stream = send(&router, "GET", "/login-stream")
            .await
            .into_body()
            .into_data_stream();

        hub.broadcast(NotificationMessage::new(DEFAULT_CHANNEL, "a\rb"))
            .await;

        let frame = next_frame(&mut stream).await.unwrap();
        assert!(frame.contains("data: a\rdata: b\n"));
    }

    #[tokio::test]
    async fn test_connection_loss_ends_stream_with_error_event() {
        let (router, hub) = app();
        let mut stream = send(&router, "GET", "/login-stream")
            .await
            .into_body()
            .into_data_stream();

        hub.fail("Notification connection lost: reset").await;

        let frame = next_frame(&mut stream).await.unwrap();
        assert!(frame.contains("event: error"));
        assert!(frame.contains("connection lost"));
        assert!(tokio::time::timeout(Duration::from_secs(1), stream.next())
            .await
            .unwrap()
            .is_none());

        let response = send(&router, "GET", "/login-stream").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
