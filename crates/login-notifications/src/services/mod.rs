//! Service layer for login events.

pub mod login;

pub use login::LoginService;
