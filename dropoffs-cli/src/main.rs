//! dropoffs - find recycling drop-off points near a coordinate
//!
//! Entry point for the service binary:
//! - `serve`: HTTP API (`GET /data/dropoffs?centerLat=..&centerLng=..`)
//! - `nearby`: one lookup, GeoJSON on stdout
//! - `check`: validate configuration (optionally connect)
//!
//! Startup errors (missing credentials, unreachable store) end the process
//! here with a non-zero status; nothing below `main` exits.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "dropoffs",
    author,
    version,
    about = "Nearby recycling drop-off lookup over PostGIS",
    long_about = "Ranks drop-off locations by distance to a center point and returns \
                  those within the search radius as a GeoJSON FeatureCollection."
)]
struct Cli {
    /// Debug-level logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Look up drop-offs near one point and print GeoJSON
    Nearby(commands::nearby::NearbyArgs),
    /// Validate configuration without serving
    Check(commands::check::CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads env fallbacks
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;
    if let Ok(path) = dotenv {
        tracing::debug!("Loaded .env from {}", path.display());
    }

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Nearby(args) => commands::run_nearby(args).await,
        Commands::Check(args) => commands::run_check(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
