//! Exorate API (exo-api) - catalog proxy and ratings service
//!
//! Relays the exoplanet archive CSV to clients and stores/averages
//! per-planet habitability ratings in SQLite.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use exo_api::{build_router, upstream::UpstreamCatalog, AppState};
use exo_common::config::TomlConfig;
use exo_common::db::init_database;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for exo-api
#[derive(Parser, Debug)]
#[command(name = "exo-api")]
#[command(about = "Exoplanet catalog proxy and ratings service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "EXO_API_PORT")]
    port: Option<u16>,

    /// SQLite ratings database path
    #[arg(short, long, env = "EXO_DATABASE")]
    database: Option<PathBuf>,

    /// Upstream CSV catalog URL
    #[arg(long, env = "EXO_CATALOG_URL")]
    catalog_url: Option<String>,

    /// TOML configuration file
    #[arg(short, long, env = "EXO_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "exo_api={0},exo_common={0},tower_http={0}",
                    config.logging.level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Exorate API (exo-api) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let port = args.port.unwrap_or(config.port);
    let db_path = args.database.unwrap_or(config.database_path);
    let catalog_url = args.catalog_url.unwrap_or(config.catalog_url);

    info!("Database path: {}", db_path.display());
    info!("Catalog source: {}", catalog_url);

    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize ratings database")?;

    let catalog = UpstreamCatalog::new(catalog_url).context("Failed to build catalog client")?;

    let app = build_router(AppState::new(pool, catalog));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("exo-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
