#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

//! Aegisd - AEGIS verification server
//!
//! This daemon provides:
//! - HTTP API for submitting AI-model training metadata
//! - Compliance verification against the compute threshold
//! - PDF certificate downloads
//! - SQLite submission store

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use aegisd::api;
use aegisd::config::Config;
use aegisd::state::AppState;

#[derive(Parser)]
#[command(name = "aegisd")]
#[command(about = "AEGIS verification server", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server (default)
    Start {
        /// Bind address
        #[arg(short, long)]
        listen: Option<SocketAddr>,

        /// Path to the submission database
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Show server status
    Status {
        /// Server URL
        #[arg(default_value = "http://127.0.0.1:8787")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        None | Some(Commands::Start { .. }) => {
            let mut config = Config::from_env()?;

            // Apply CLI overrides
            if let Some(Commands::Start { listen, db }) = cli.command {
                if let Some(listen) = listen {
                    config.listen_addr = listen;
                }
                if let Some(db) = db {
                    config.database_path = db;
                }
            }

            run_server(config).await
        }

        Some(Commands::Status { url }) => check_status(&url).await,
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        listen = %config.listen_addr,
        db = %config.database_path.display(),
        "Starting aegisd"
    );

    let state = AppState::new(config.clone())?;
    let app = api::create_router(state.clone());

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!(address = %config.listen_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(
        submissions = state.store.count().unwrap_or(0),
        uptime_secs = state.uptime_secs(),
        "Shut down cleanly"
    );
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

async fn check_status(url: &str) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let resp = client.get(format!("{}/health", url)).send().await?;

    if resp.status().is_success() {
        let health: api::HealthResponse = resp.json().await?;
        println!("Status: {}", health.status);
        println!("Version: {}", health.version);
        println!("Uptime: {}s", health.uptime_secs);
        println!("Submissions: {}", health.submission_count);
    } else {
        println!("Error: {} {}", resp.status(), resp.text().await?);
    }

    Ok(())
}
