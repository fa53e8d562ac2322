//! HTTP handlers for the login service.

pub mod health;
pub mod login;
pub mod stream;

pub use stream::login_stream;
