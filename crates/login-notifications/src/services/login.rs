//! Login service: records logins and reads them back.

use std::sync::Arc;

use crate::db::{LoginEvent, LoginEventRepository, NewLoginEvent};
use pgdemo_common::{AppError, AppResult, ResultExt};

/// Maximum accepted username length (matches the column width).
const MAX_USERNAME_LEN: usize = 255;

/// Service for login operations.
#[derive(Clone)]
pub struct LoginService {
    repository: Arc<dyn LoginEventRepository>,
}

impl LoginService {
    /// Create a new login service.
    pub fn new(repository: Arc<dyn LoginEventRepository>) -> Self {
        Self { repository }
    }

    /// Record a login by `username` at the current time.
    pub async fn login(&self, username: &str) -> AppResult<LoginEvent> {
        validate_username(username)?;

        let event = self
            .repository
            .save(NewLoginEvent::now(username))
            .await
            .log("saving login event")?;

        tracing::info!(id = event.id, username = %event.username, "Login recorded");

        Ok(event)
    }

    /// All recorded logins, optionally for one user.
    pub async fn list(&self, username: Option<&str>) -> AppResult<Vec<LoginEvent>> {
        match username {
            Some(name) => self.repository.find_all_by_username(name).await,
            None => self.repository.find_all().await,
        }
    }
}

fn validate_username(username: &str) -> AppResult<()> {
    if username.trim().is_empty() {
        return Err(AppError::Validation("username must not be blank".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::Validation(format!(
            "username exceeds {} characters",
            MAX_USERNAME_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgdemo_common::InMemoryRepository;

    fn service() -> LoginService {
        LoginService::new(Arc::new(InMemoryRepository::<LoginEvent>::new()))
    }

    #[tokio::test]
    async fn test_login_then_list() {
        let service = service();
        service.login("alice").await.unwrap();
        service.login("bob").await.unwrap();
        service.login("alice").await.unwrap();

        assert_eq!(service.list(None).await.unwrap().len(), 3);

        let alice = service.list(Some("alice")).await.unwrap();
        assert_eq!(alice.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_blank_username_rejected() {
        let err = service().login("   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
