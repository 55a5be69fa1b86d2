//! One-shot proximity lookup printed to stdout

use anyhow::{Context, Result};
use clap::Parser;
use dropoffs_server::{Coordinate, DropoffRepo};

use crate::config::{DbArgs, QueryArgs};

/// Arguments for the nearby command
#[derive(Parser, Debug)]
pub struct NearbyArgs {
    /// Center latitude (decimal degrees)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: String,

    /// Center longitude (decimal degrees)
    #[arg(long, allow_hyphen_values = true)]
    pub lng: String,

    #[command(flatten)]
    pub db: DbArgs,

    #[command(flatten)]
    pub query: QueryArgs,
}

/// Print the GeoJSON feature collection for one center point
pub async fn run_nearby(args: NearbyArgs) -> Result<()> {
    let center = Coordinate::parse(&args.lat, &args.lng).context("invalid center coordinate")?;
    let settings = args.query.settings()?;
    let pool = args.db.open_pool().await?;

    let collection = DropoffRepo::new(&pool, &settings)
        .nearby(center)
        .await
        .context("proximity query failed");
    pool.close().await;

    println!("{}", collection?.as_str());
    Ok(())
}
