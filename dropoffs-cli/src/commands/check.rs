//! Configuration check
//!
//! Resolves the same settings `serve` would use and reports them, so a
//! deployment can fail fast in CI or an init container.

use anyhow::Result;
use clap::Parser;
use dropoffs_server::ConnectMode;

use crate::config::{DbArgs, QueryArgs};

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Also open the pool to prove the store is reachable
    #[arg(long)]
    pub connect: bool,

    #[command(flatten)]
    pub db: DbArgs,

    #[command(flatten)]
    pub query: QueryArgs,
}

pub async fn run_check(args: CheckArgs) -> Result<()> {
    let (mode, pool_config) = args.db.validate()?;
    let settings = args.query.settings()?;

    match &mode {
        ConnectMode::Network(creds) => println!(
            "mode: network ({}@{}:{}/{})",
            creds.user, creds.host, creds.port, creds.database
        ),
        ConnectMode::LocalSocket { socket_dir, .. } => println!(
            "mode: local socket ({})",
            socket_dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| "default directory".into())
        ),
    }
    println!(
        "pool: max_idle={} max_open={} max_lifetime={}s",
        pool_config.max_idle, pool_config.max_open, pool_config.max_lifetime_secs
    );
    println!(
        "query: table={} radius={}m limit={}",
        settings.table, settings.radius_meters, settings.row_limit
    );

    if args.connect {
        let pool = args.db.open_pool().await?;
        println!("connection: ok ({} open)", pool.size());
        pool.close().await;
    }

    Ok(())
}
