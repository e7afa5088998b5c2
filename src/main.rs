use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use raiztech_api::common::AppState;
use raiztech_api::config::Config;
use raiztech_api::{db, routes};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,raiztech_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting raiztech-api...");

    // Load configuration (fail-fast)
    let config = Config::from_env()?;
    tracing::info!(
        host = %config.api_host,
        port = config.api_port,
        static_dir = %config.static_dir,
        "Configuration loaded"
    );

    // Connect to database (fail-fast)
    let db = db::connect(&config).await?;

    if config.run_migrations {
        tracing::info!("Running migrations...");
        migration::Migrator::up(&db, None).await?;
        tracing::info!("Migrations completed");
    } else {
        tracing::info!("Skipping migrations (RUN_MIGRATIONS=false)");
    }

    let addr = config.bind_address();
    let db = Arc::new(db);
    let state = AppState::new(Arc::clone(&db), config);

    // Build router
    let app = routes::build_router(state);

    // Start server with graceful shutdown
    tracing::info!(address = %addr, "Starting server");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router and its state are dropped once `serve` returns.
    match Arc::try_unwrap(db) {
        Ok(db) => db::disconnect(db).await,
        Err(_) => tracing::warn!("MySQL pool still shared at shutdown; leaving it to drop"),
    }
    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        },
    }
}
