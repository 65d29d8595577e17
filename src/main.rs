//! Address lookup gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────┐
//!                     │                   ADDRESS GATEWAY                     │
//!                     │                                                      │
//!   Client Request    │  ┌─────────┐   ┌─────────────┐                       │
//!   ──────────────────┼─▶│  http   │──▶│ method guard│── non-GET ──▶ 204      │
//!                     │  │ server  │   └──────┬──────┘                       │
//!                     │  └─────────┘          │ GET                          │
//!                     │          ┌────────────┴───────────┐                  │
//!                     │          ▼                        ▼                  │
//!                     │   ┌─────────────┐         ┌──────────────┐           │
//!                     │   │  frontend   │         │ /api proxy   │           │
//!                     │   │ index.html  │         │  + classify  │           │
//!                     │   └─────────────┘         └──────┬───────┘           │
//!                     │                                  │                   │
//!                     │                         ┌────────┴────────┐          │
//!                     │                         ▼                 ▼          │
//!                     │                  ┌─────────────┐   ┌────────────┐    │   Address
//!                     │                  │   token     │   │  upstream  │◀───┼──── API
//!                     │                  │ cache+creds │──▶│   client   │────┼───▶
//!                     │                  └─────────────┘   └────────────┘    │
//!                     └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use address_gateway::config::{resolve_config, ListenerOverrides};
use address_gateway::lifecycle::startup;
use address_gateway::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "address-gateway")]
#[command(about = "Serve the address lookup frontend and proxy /api to the postal API", long_about = None)]
struct Cli {
    /// Interface to bind.
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to bind.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// TOML config file (defaults to ./gateway.toml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = resolve_config(
        cli.config.as_deref(),
        ListenerOverrides {
            host: cli.host,
            port: cli.port,
        },
    )?;

    init_logging(config.observability.log_format);
    tracing::info!("address-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await
}
