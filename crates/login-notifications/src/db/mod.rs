//! Database layer for login events.

pub mod models;
pub mod queries;
pub mod repository;

pub use models::{LoginEvent, NewLoginEvent};
pub use repository::{LoginEventRepository, PgLoginEventRepository};

/// DDL for the `login_event` table and its NOTIFY trigger.
pub const SCHEMA: &str = include_str!("../../sql/schema.sql");
