//! HTTP server configuration shared by the demo services.

use serde::Deserialize;

/// Server configuration loaded from environment variables.
///
/// Environment variables are prefixed with `DEMO_`:
/// - `DEMO_HOST`: Server bind address (default: "0.0.0.0")
/// - `DEMO_PORT`: Server port (default: per service)
/// - `DEMO_INIT_SCHEMA`: Apply the bundled DDL at startup (default: false)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Apply the service schema before serving traffic
    pub init_schema: bool,
}

/// Raw environment view; every field is optional so that each service can
/// supply its own defaults.
#[derive(Debug, Default, Deserialize)]
struct AppConfigEnv {
    host: Option<String>,
    port: Option<u16>,
    init_schema: Option<bool>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl AppConfig {
    /// Defaults for a service listening on `port`.
    pub fn with_port(port: u16) -> Self {
        Self {
            host: default_host(),
            port,
            init_schema: false,
        }
    }

    /// Load configuration from `DEMO_`-prefixed environment variables,
    /// filling unset values from `defaults`.
    pub fn from_env_or(defaults: AppConfig) -> Result<Self, envy::Error> {
        let env = envy::prefixed("DEMO_").from_env::<AppConfigEnv>()?;
        Ok(env.apply(defaults))
    }

    /// Get the server bind address as a string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfigEnv {
    fn apply(self, defaults: AppConfig) -> AppConfig {
        AppConfig {
            host: self.host.unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
            init_schema: self.init_schema.unwrap_or(defaults.init_schema),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_port(8080)
    }
}
