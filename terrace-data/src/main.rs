//! terrace-data - Sports reference data microservice
//!
//! Imports players and squad memberships from the API-Football
//! provider and serves the reference dataset (countries, leagues,
//! teams, players, squads) over HTTP for the rest of the Terrace
//! platform.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use terrace_data::config::resolve_provider_config;
use terrace_data::services::api_football::ApiFootballClient;
use terrace_data::services::player_import::PlayerImporter;
use terrace_data::services::source::PlayersSource;
use terrace_data::AppState;

/// Command-line arguments for terrace-data
#[derive(Parser, Debug)]
#[command(name = "terrace-data")]
#[command(about = "Sports reference data microservice for Terrace")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "TERRACE_DATA_PORT")]
    port: Option<u16>,

    /// Path to the TOML configuration file
    #[arg(short, long, env = "TERRACE_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the SQLite database file
    #[arg(short, long, env = "TERRACE_DATABASE")]
    database: Option<PathBuf>,
}

const DEFAULT_PORT: u16 = 5770;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "terrace_data=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command-line arguments
    let args = Args::parse();

    info!("Starting terrace-data v{}", env!("CARGO_PKG_VERSION"));

    let toml_config = terrace_common::config::load_config(args.config.as_deref())
        .context("Failed to load configuration")?;

    let port = args
        .port
        .or(toml_config.port)
        .unwrap_or(DEFAULT_PORT);

    let db_path = args
        .database
        .clone()
        .or_else(|| toml_config.database_path.clone())
        .unwrap_or_else(terrace_common::config::default_database_path);
    info!("Database: {}", db_path.display());

    let db_pool = terrace_common::db::connect(&db_path)
        .await
        .context("Failed to open database")?;
    terrace_common::db::schema::ensure_schema(&db_pool)
        .await
        .context("Failed to prepare database schema")?;

    let provider_config = resolve_provider_config(&toml_config);
    let source: Arc<dyn PlayersSource> = Arc::new(
        ApiFootballClient::new(&provider_config).context("Failed to build provider client")?,
    );

    let importer = Arc::new(PlayerImporter::with_store(db_pool.clone(), source));
    let state = AppState::new(db_pool, importer);
    let app = terrace_data::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

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
