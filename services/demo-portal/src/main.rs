//! Demo portal CLI
//!
//! Starts the status and message board front-end for the DevOps demo backend.

use std::path::PathBuf;

use clap::Parser;
use demo_portal::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "demo-portal")]
#[command(about = "Status and message board front-end for the DevOps demo backend")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host the portal is served under (overrides config file)
    #[arg(long)]
    host: Option<String>,

    /// Page server port (overrides config file)
    #[arg(long)]
    page_port: Option<u16>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, host={:?}, page_port={:?}, log_level={:?}",
        args.config,
        args.host,
        args.page_port,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(host) = args.host {
        config.backend.host = host;
    }
    if let Some(page_port) = args.page_port {
        config.page.port = page_port;
    }

    tracing::info!("Starting demo portal");
    demo_portal::run(config).await?;

    Ok(())
}
