//! Person and person event repositories.

use async_trait::async_trait;

use crate::db::models::{NewPerson, NewPersonEvent, Person, PersonEvent};
use crate::db::queries;
use pgdemo_common::db::DbPool;
use pgdemo_common::{AppResult, CrudRepository, InMemoryRepository};

/// Storage for persons.
#[async_trait]
pub trait PersonRepository: CrudRepository<Entity = Person> {
    /// Persons with the given last name.
    async fn find_all_by_last_name(&self, last_name: &str) -> AppResult<Vec<Person>>;
}

/// Storage for person events.
pub trait PersonEventRepository: CrudRepository<Entity = PersonEvent> {}

impl<T: CrudRepository<Entity = PersonEvent>> PersonEventRepository for T {}

/// PostgreSQL-backed repository over the `person` table.
#[derive(Clone)]
pub struct PgPersonRepository {
    pool: DbPool,
}

impl PgPersonRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository for PgPersonRepository {
    type Entity = Person;

    async fn save(&self, draft: NewPerson) -> AppResult<Person> {
        queries::insert_person(&self.pool, &draft).await
    }

    async fn find_all(&self) -> AppResult<Vec<Person>> {
        queries::list_persons(&self.pool).await
    }
}

#[async_trait]
impl PersonRepository for PgPersonRepository {
    async fn find_all_by_last_name(&self, last_name: &str) -> AppResult<Vec<Person>> {
        queries::list_persons_by_last_name(&self.pool, last_name).await
    }
}

#[async_trait]
impl PersonRepository for InMemoryRepository<Person> {
    async fn find_all_by_last_name(&self, last_name: &str) -> AppResult<Vec<Person>> {
        Ok(self.find_where(|p| p.last_name == last_name).await)
    }
}

/// PostgreSQL-backed repository over the `person_event` table.
#[derive(Clone)]
pub struct PgPersonEventRepository {
    pool: DbPool,
}

impl PgPersonEventRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository for PgPersonEventRepository {
    type Entity = PersonEvent;

    async fn save(&self, draft: NewPersonEvent) -> AppResult<PersonEvent> {
        queries::insert_person_event(&self.pool, &draft).await
    }

    async fn find_all(&self) -> AppResult<Vec<PersonEvent>> {
        queries::list_person_events(&self.pool).await
    }
}
