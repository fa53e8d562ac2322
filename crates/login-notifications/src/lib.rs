//! Login events over PostgreSQL with live LISTEN/NOTIFY streaming.
//!
//! Every `POST /login/{username}` inserts a row into `login_event`; a
//! database trigger then publishes the username on a notification channel.
//! A single dedicated connection `LISTEN`s on that channel and fans each
//! notification out to every client attached to `GET /login-stream`.
//!
//! ## Modules
//!
//! - [`bridge`]: The listening connection and the subscriber hub
//! - [`config`]: Listener configuration
//! - [`db`]: Login event model, queries and repositories
//! - [`handlers`]: HTTP route handlers
//! - [`router`]: Route table
//! - [`services`]: Login business logic
//! - [`state`]: Shared application state

pub mod bridge;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod router;
pub mod services;
pub mod state;

pub use error::BridgeError;
