//! Farm CLI
//!
//! Shell front end for the rendering-farm management API. Every remote
//! operation is a subcommand named after it, e.g.
//!
//! ```text
//! farm ListFleets --FarmId farm-123
//! farm GetFleet --FarmId farm-123 --FleetId fleet-1 --select Status
//! farm GetFleet --FarmId farm-123 --Id fleet-1 | farm UpdateFleet --stdin --MaxWorkerCount 20
//! ```

mod commands;
mod config;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "farm")]
#[command(about = "Rendering farm management CLI", long_about = None)]
struct Cli {
    /// Farm API endpoint URL
    #[arg(long, env = "FARM_ENDPOINT_URL", default_value = config::DEFAULT_ENDPOINT_URL)]
    endpoint_url: String,

    /// Region the endpoint serves
    #[arg(long, env = "FARM_REGION", default_value = config::DEFAULT_REGION)]
    region: String,

    /// Bearer token sent with every request
    #[arg(long, env = "FARM_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "FARM_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Treat binding warnings as errors
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "error".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        endpoint_url: cli.endpoint_url,
        region: cli.region,
        token: cli.token,
        timeout: cli.timeout_secs.map(Duration::from_secs),
        strict: cli.strict,
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}
