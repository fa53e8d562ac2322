//! Login notification server.
//!
//! Stores login events and streams the database's notifications for them
//! to server-sent-event clients.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use login_notifications::{
    bridge::{NotificationBridge, NotificationHub},
    config::ListenConfig,
    db::{PgLoginEventRepository, SCHEMA},
    handlers::health::BridgeHealthState,
    router,
    services::LoginService,
    state::AppState,
    BridgeError,
};
use pgdemo_common::{
    config::AppConfig,
    db::create_pool,
    health::HealthState,
    server::{
        init_tracing, load_app_config, load_database_config, maybe_init_schema, shutdown_signal,
        with_common_layers,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    init_tracing("info,login_notifications=debug,pgdemo_common=debug,tower_http=debug");

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting login notification server"
    );

    let app_config = load_app_config(AppConfig::with_port(8080));
    let db_config = load_database_config();
    let listen_config = ListenConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load listen config, using defaults");
        ListenConfig::default()
    });

    tracing::info!(
        host = %app_config.host,
        port = app_config.port,
        database = %db_config.redacted_url(),
        channel = %listen_config.notify_channel,
        "Configuration loaded"
    );

    let db_pool = create_pool(&db_config)
        .await
        .map_err(BridgeError::ConnectionAcquisition)?;

    maybe_init_schema(&app_config, &db_pool, "login_event", SCHEMA)
        .await
        .context("applying login_event schema")?;

    // The hub exists before LISTEN is issued so nothing emitted after
    // registration can be missed by a subscriber.
    let hub = NotificationHub::new();
    let bridge = NotificationBridge::start(&db_config, &listen_config, hub.clone()).await?;

    let logins = LoginService::new(Arc::new(PgLoginEventRepository::new(db_pool.clone())));
    let state = AppState::new(logins, hub.clone(), listen_config.keep_alive());

    let app = with_common_layers(
        router::routes(state).merge(router::health_routes(BridgeHealthState {
            health: HealthState::new(db_pool.clone()),
            hub,
        })),
    );

    let addr: SocketAddr = app_config.bind_address().parse()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(address = %addr, channel = %bridge.channel(), "Server listening");

    // Event streams never end on their own, so the bridge must close them
    // before graceful shutdown can complete.
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            bridge.shutdown().await;
        })
        .await?;

    db_pool.close().await;

    tracing::info!("Server shutdown complete");

    Ok(())
}
