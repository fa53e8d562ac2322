//! Process-level plumbing shared by the service binaries: tracing setup,
//! router layers, schema bootstrap and shutdown signalling.

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, DatabaseConfig};
use crate::db::{apply_schema, DbPool};

/// Initialize tracing/logging.
///
/// `RUST_LOG` takes precedence over `default_filter`. Setting
/// `DEMO_LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let json = std::env::var("DEMO_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Load the server configuration, falling back to `defaults` on parse errors.
pub fn load_app_config(defaults: AppConfig) -> AppConfig {
    AppConfig::from_env_or(defaults.clone()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load app config, using defaults");
        defaults
    })
}

/// Load the database configuration, falling back to defaults on parse errors.
pub fn load_database_config() -> DatabaseConfig {
    DatabaseConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load database config, using defaults");
        DatabaseConfig::default()
    })
}

/// Apply `ddl` when `DEMO_INIT_SCHEMA` is enabled.
pub async fn maybe_init_schema(
    config: &AppConfig,
    pool: &DbPool,
    name: &str,
    ddl: &str,
) -> Result<(), sqlx::Error> {
    if config.init_schema {
        apply_schema(pool, name, ddl).await
    } else {
        tracing::debug!(schema = %name, "Schema bootstrap disabled");
        Ok(())
    }
}

/// Wrap a router with request tracing and permissive CORS.
pub fn with_common_layers(router: Router) -> Router {
    // CORS configuration - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router.layer(TraceLayer::new_for_http()).layer(cors)
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
