//! Database module for the demo services.
//!
//! This module provides PostgreSQL connectivity using SQLx.

pub mod pool;
pub mod schema;

pub use pool::{create_dedicated, create_pool, health_check, DbPool};
pub use schema::apply_schema;
