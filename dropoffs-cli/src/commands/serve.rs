//! HTTP server command
//!
//! Opens the pool (fatal on failure), then serves `/data/dropoffs` until
//! Ctrl+C or SIGTERM.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dropoffs_server::http::{run_server, AppState, ServerConfig};

use crate::config::{DbArgs, QueryArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long, env = "DROPOFFS_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Serve the map front-end from this directory
    #[arg(long, env = "DROPOFFS_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    #[command(flatten)]
    pub db: DbArgs,

    #[command(flatten)]
    pub query: QueryArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    // Settle everything that can fail before opening connections
    let query = args.query.settings()?;
    let pool = args.db.open_pool().await?;

    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        cors_permissive: args.cors_permissive,
        static_dir: args.static_dir,
    };

    tracing::info!("Starting dropoffs server on {}", config.bind_addr);

    // Blocks until shutdown
    run_server(AppState::new(pool, query), config)
        .await
        .context("Server error")?;

    Ok(())
}
