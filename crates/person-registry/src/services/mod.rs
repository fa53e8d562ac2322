//! Service layer for persons.

pub mod person;

pub use person::PersonService;
