//! Generic record repository abstraction.
//!
//! Handlers and services talk to storage only through [`CrudRepository`],
//! so each service can run against PostgreSQL in production and against
//! [`InMemoryRepository`] in tests.

mod memory;

use async_trait::async_trait;

use crate::error::AppResult;

pub use memory::InMemoryRepository;

/// A stored record keyed by a database-generated integer id.
pub trait Record: Clone + Send + Sync + 'static {
    /// The unsaved form of the record (everything except the id).
    type Draft: Send + 'static;

    /// Combine a draft with the id assigned by storage.
    fn from_draft(draft: Self::Draft, id: i32) -> Self;

    /// The record id.
    fn id(&self) -> i32;
}

/// Create/read operations over records of one type.
#[async_trait]
pub trait CrudRepository: Send + Sync {
    /// Stored record type.
    type Entity: Record;

    /// Insert a new record and return it with its generated id.
    async fn save(&self, draft: <Self::Entity as Record>::Draft) -> AppResult<Self::Entity>;

    /// All records, ordered by id.
    async fn find_all(&self) -> AppResult<Vec<Self::Entity>>;
}
