//! ZeroTier Central API gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                   GATEWAY                    │
//!     Client Request      │  ┌─────────┐   ┌────────────┐   ┌─────────┐  │
//!     ────────────────────┼─▶│  http   │──▶│ normalizer │──▶│upstream │──┼──▶ api.zerotier.com
//!                         │  │ server  │   │ (request,  │   │forwarder│  │
//!                         │  └────┬────┘   │  body,     │   └────┬────┘  │
//!                         │       │        │  routing)  │        │       │
//!                         │       │        └────────────┘        │       │
//!     Client Response     │       ▼                              ▼       │
//!     ◀───────────────────┼── static assets          CORS + relayed body │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use zt_gateway::config::{load_config, validation::validate_config, ConfigError, GatewayConfig};
use zt_gateway::observability::{logging, metrics};
use zt_gateway::{GatewayServer, Shutdown};

#[derive(Parser)]
#[command(name = "zt-gateway")]
#[command(about = "Edge gateway for the ZeroTier Central API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability.log_level);

    tracing::info!("zt-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = GatewayServer::new(config)?;

    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
