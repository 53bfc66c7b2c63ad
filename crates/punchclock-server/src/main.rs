//! # Punchclock Server
//!
//! Entry point: loads configuration, connects MySQL and Redis, and serves the
//! REST API until Ctrl+C or SIGTERM.

use anyhow::Context;
use punchclock_config::{AppConfig, ConfigLoader};
use punchclock_core::telemetry::init_logging;
use punchclock_core::{HealthCheck, SystemClock};
use punchclock_repository::create_pool;
use punchclock_rest::create_router;
use punchclock_server::startup::{print_banner, print_startup_info, shutdown_signal};
use punchclock_server::wiring::{build_state, create_redis_pool, mysql_repositories};
use punchclock_service::RedisSessionStore;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.into_inner(),
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.observability.log_level, config.observability.log_format);
    print_banner();

    info!("Starting Punchclock Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        error!("Application error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let db_pool = create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;

    if config.database.run_migrations {
        db_pool
            .run_migrations()
            .await
            .context("Failed to run database migrations")?;
    }

    let redis_pool = create_redis_pool(&config.redis).context("Failed to create Redis pool")?;
    let session_store = Arc::new(RedisSessionStore::new(redis_pool));

    let health_checks: Vec<Arc<dyn HealthCheck>> = vec![db_pool.clone(), session_store.clone()];
    let state = build_state(
        &config,
        mysql_repositories(&db_pool),
        session_store,
        Arc::new(SystemClock),
    )
    .with_health_checks(health_checks);

    let router = create_router(state, &config.server, &config.observability);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    print_startup_info(&config);
    info!("Starting REST server on http://{}", addr);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("REST server error");

    db_pool.close().await;
    info!("Server shutdown complete");
    served
}
