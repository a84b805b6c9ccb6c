use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sortstream::{ServerConfig, SortServer};

#[derive(Debug, Parser)]
#[command(name = "sortstream")]
#[command(about = "Stream sorting algorithm steps over WebSocket")]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen host.
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    for (id, path) in &config.dataset.files {
        if !path.exists() {
            tracing::warn!(dataset = %id, path = %path.display(), "dataset file not found");
        }
    }

    let addr = config.listen_addr();
    SortServer::new(config)
        .serve()
        .await
        .with_context(|| format!("serve on {addr}"))
}
