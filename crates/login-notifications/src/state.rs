//! Application state for the login service.

use std::time::Duration;

use crate::bridge::NotificationHub;
use crate::services::LoginService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Login persistence
    pub logins: LoginService,

    /// Fan-out hub fed by the notification bridge
    pub hub: NotificationHub,

    /// Keep-alive interval for event streams
    pub keep_alive: Duration,
}

impl AppState {
    pub fn new(logins: LoginService, hub: NotificationHub, keep_alive: Duration) -> Self {
        Self {
            logins,
            hub,
            keep_alive,
        }
    }
}
