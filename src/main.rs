//! Forwarding gateway
//!
//! Sits between the browser and the backend API, relaying requests under a
//! local prefix.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │               FORWARDING GATEWAY              │
//!    Client Request      │  ┌─────────┐   ┌──────────┐   ┌────────────┐  │
//!    ────────────────────┼─▶│  axum   │──▶│ routing  │──▶│ forwarder  │──┼──▶ Upstream
//!                        │  │ router  │   │ (target) │   │ / auth     │  │     API
//!                        │  └─────────┘   └──────────┘   └─────┬──────┘  │
//!    Client Response     │  ┌──────────────────────┐           │         │
//!    ◀───────────────────┼──│ security::headers    │◀──────────┘         │
//!                        │  │ (hop-by-hop removed) │                     │
//!                        │  └──────────────────────┘                     │
//!                        └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use forwarding_gateway::config::{self, GatewayConfig};
use forwarding_gateway::lifecycle::{signals, Shutdown};
use forwarding_gateway::observability::{logging, metrics};
use forwarding_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "forwarding-gateway")]
#[command(about = "Relays browser requests to a backend API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Upstream base URL; takes precedence over environment and config file.
    #[arg(short, long)]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);
    tracing::info!("forwarding-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    let upstream = config::resolve_upstream(&config, cli.upstream.as_deref(), |name| {
        std::env::var(name).ok()
    })?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        prefix = %config.routes.prefix,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        max_body_size = config.limits.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(&shutdown);

    let server = HttpServer::new(config, upstream)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
