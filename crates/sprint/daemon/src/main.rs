//! Sprint Daemon - REST adapter for the sprint platform
//!
//! `sprintd` exposes the submission lifecycle and verification protocol over
//! HTTP. The daemon owns no business rules: every request is resolved to an
//! actor and handed to the sprint service.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod error;
mod seed;
mod server;

use config::DaemonConfig;
use error::DaemonResult;
use server::Server;

/// Sprint Daemon CLI
#[derive(Parser)]
#[command(name = "sprintd")]
#[command(about = "Sprint platform REST daemon", long_about = None)]
#[command(version)]
struct Cli {
    /// Listen address
    #[arg(
        short,
        long,
        env = "SPRINT_LISTEN_ADDR",
        default_value = "127.0.0.1:8080"
    )]
    listen: String,

    /// Log level
    #[arg(long, env = "SPRINT_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "SPRINT_LOG_JSON")]
    json: bool,

    /// Seed demo projects and accounts on startup
    #[arg(long, env = "SPRINT_SEED_DEMO")]
    seed_demo: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());

    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let config = DaemonConfig::from_cli(&cli.listen, cli.seed_demo)?;
    Server::new(config)?.run().await
}
