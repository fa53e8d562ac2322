//! Person registry over PostgreSQL.
//!
//! Creating a person writes the person row and a `CREATED` entry in the
//! `person_event` log; both tables can be listed, and persons can be looked
//! up by last name.

pub mod db;
pub mod handlers;
pub mod router;
pub mod services;
