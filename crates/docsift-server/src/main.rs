//! Docsift server binary
//!
//! Loads `.env`, reads configuration, and serves the document endpoints.

use clap::Parser;
use docsift_server::config::{api_key_from_env, ServerConfig};
use docsift_server::{init_tracing, start_server, ServerError};
use std::path::PathBuf;
use std::process;
use tracing::warn;

/// Document text extraction and structuring server
#[derive(Debug, Parser)]
#[command(name = "docsift-server", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "DOCSIFT_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on, overriding the configuration file
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    // Before parsing so .env values reach clap's env fallbacks
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ServerError> {
    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => {
            warn!("No config file specified, using defaults");
            ServerConfig::default()
        }
    };

    if let Some(port) = cli.port {
        config.bind_port = port;
    }

    let api_key = api_key_from_env()?;

    start_server(config, api_key).await
}
