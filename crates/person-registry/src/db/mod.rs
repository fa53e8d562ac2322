//! Database layer for persons and their events.

pub mod models;
pub mod queries;
pub mod repository;

pub use models::{NewPerson, NewPersonEvent, Person, PersonEvent, ACTION_CREATED};
pub use repository::{
    PersonEventRepository, PersonRepository, PgPersonEventRepository, PgPersonRepository,
};

/// DDL for the `person` and `person_event` tables.
pub const SCHEMA: &str = include_str!("../../sql/schema.sql");
