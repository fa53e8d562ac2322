//! Shared plumbing for the Postgres demo services.
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from environment variables
//! - [`db`]: Connection pools and schema bootstrap
//! - [`error`]: Custom error types with Axum integration
//! - [`health`]: Liveness and readiness endpoints
//! - [`repository`]: The generic CRUD repository abstraction
//! - [`server`]: Tracing setup, router layers and shutdown signalling

pub mod config;
pub mod db;
pub mod error;
pub mod health;
pub mod repository;
pub mod result_ext;
pub mod server;

pub use error::{AppError, AppResult};
pub use repository::{CrudRepository, InMemoryRepository, Record};
pub use result_ext::ResultExt;
