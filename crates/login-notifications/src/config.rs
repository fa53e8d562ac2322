//! Notification listener configuration.

use std::time::Duration;

use serde::Deserialize;

/// Listener settings loaded from environment variables.
///
/// Environment variables are prefixed with `DEMO_`:
/// - `DEMO_NOTIFY_CHANNEL`: Channel to `LISTEN` on (default: "login_event_notification")
/// - `DEMO_KEEP_ALIVE_SECS`: SSE keep-alive comment interval (default: 15)
/// - `DEMO_CLOSE_TIMEOUT_SECS`: Upper bound on closing the listener at shutdown (default: 5)
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Channel name
    #[serde(default = "default_channel")]
    pub notify_channel: String,

    /// Keep-alive interval for event streams, in seconds
    #[serde(default = "default_keep_alive")]
    pub keep_alive_secs: u64,

    /// Close timeout, in seconds
    #[serde(default = "default_close_timeout")]
    pub close_timeout_secs: u64,
}

/// Channel the bundled trigger publishes to.
pub const DEFAULT_CHANNEL: &str = "login_event_notification";

fn default_channel() -> String {
    DEFAULT_CHANNEL.to_string()
}

fn default_keep_alive() -> u64 {
    15
}

fn default_close_timeout() -> u64 {
    5
}

impl ListenConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("DEMO_").from_env::<ListenConfig>()
    }

    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs.max(1))
    }

    pub fn close_timeout(&self) -> Duration {
        Duration::from_secs(self.close_timeout_secs)
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            notify_channel: default_channel(),
            keep_alive_secs: default_keep_alive(),
            close_timeout_secs: default_close_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ListenConfig::default();
        assert_eq!(config.notify_channel, "login_event_notification");
        assert_eq!(config.keep_alive(), Duration::from_secs(15));
        assert_eq!(config.close_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_keep_alive_never_zero() {
        let config = ListenConfig {
            keep_alive_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.keep_alive(), Duration::from_secs(1));
    }
}
