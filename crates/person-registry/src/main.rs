//! Person registry server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use person_registry::{
    db::{PgPersonEventRepository, PgPersonRepository, SCHEMA},
    router,
    services::PersonService,
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

    init_tracing("info,person_registry=debug,pgdemo_common=debug,tower_http=debug");

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting person registry"
    );

    let app_config = load_app_config(AppConfig::with_port(8081));
    let db_config = load_database_config();

    tracing::info!(
        host = %app_config.host,
        port = app_config.port,
        database = %db_config.redacted_url(),
        "Configuration loaded"
    );

    let db_pool = create_pool(&db_config)
        .await
        .context("connecting to database")?;

    maybe_init_schema(&app_config, &db_pool, "person", SCHEMA)
        .await
        .context("applying person schema")?;

    let service = PersonService::new(
        Arc::new(PgPersonRepository::new(db_pool.clone())),
        Arc::new(PgPersonEventRepository::new(db_pool.clone())),
    );

    let app = with_common_layers(
        router::routes(service).merge(router::health_routes(HealthState::new(db_pool.clone()))),
    );

    let addr: SocketAddr = app_config.bind_address().parse()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;

    tracing::info!("Server shutdown complete");

    Ok(())
}
