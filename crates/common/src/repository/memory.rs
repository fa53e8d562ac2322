//! In-process repository backed by a vector.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CrudRepository, Record};
use crate::error::AppResult;

/// Repository keeping records in memory, assigning ids like a `SERIAL`
/// column (starting at 1, never reused).
pub struct InMemoryRepository<T> {
    rows: Arc<RwLock<Vec<T>>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Records matching `predicate`, ordered by id.
    pub async fn find_where<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows
            .read()
            .await
            .iter()
            .filter(|row| predicate(*row))
            .cloned()
            .collect()
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
        }
    }
}

#[async_trait]
impl<T: Record> CrudRepository for InMemoryRepository<T> {
    type Entity = T;

    async fn save(&self, draft: T::Draft) -> AppResult<T> {
        let mut rows = self.rows.write().await;
        let id = rows.last().map(|row| row.id() + 1).unwrap_or(1);
        let record = T::from_draft(draft, id);
        rows.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> AppResult<Vec<T>> {
        Ok(self.rows.read().await.clone())
    }
}
