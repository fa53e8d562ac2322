//! Login event repositories.

use async_trait::async_trait;

use crate::db::models::{LoginEvent, NewLoginEvent};
use crate::db::queries;
use pgdemo_common::db::DbPool;
use pgdemo_common::{AppResult, CrudRepository, InMemoryRepository};

/// Storage for login events.
#[async_trait]
pub trait LoginEventRepository: CrudRepository<Entity = LoginEvent> {
    /// All logins of one user, oldest first.
    async fn find_all_by_username(&self, username: &str) -> AppResult<Vec<LoginEvent>>;
}

/// PostgreSQL-backed repository over the `login_event` table.
#[derive(Clone)]
pub struct PgLoginEventRepository {
    pool: DbPool,
}

impl PgLoginEventRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository for PgLoginEventRepository {
    type Entity = LoginEvent;

    async fn save(&self, draft: NewLoginEvent) -> AppResult<LoginEvent> {
        queries::insert_login_event(&self.pool, &draft).await
    }

    async fn find_all(&self) -> AppResult<Vec<LoginEvent>> {
        queries::list_login_events(&self.pool).await
    }
}

#[async_trait]
impl LoginEventRepository for PgLoginEventRepository {
    async fn find_all_by_username(&self, username: &str) -> AppResult<Vec<LoginEvent>> {
        queries::list_login_events_by_username(&self.pool, username).await
    }
}

#[async_trait]
impl LoginEventRepository for InMemoryRepository<LoginEvent> {
    async fn find_all_by_username(&self, username: &str) -> AppResult<Vec<LoginEvent>> {
        Ok(self.find_where(|e| e.username == username).await)
    }
}
