//! dropoffs-server: nearby recycling drop-off lookup
//!
//! Ranks rows of a PostGIS table by geographic distance to a center
//! coordinate and returns the survivors as a GeoJSON `FeatureCollection`
//! built by the store itself.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use config::{ConnectMode, ConnectSettings, PoolConfig, QuerySettings};
pub use db::{create_pool, DropoffRepo};
pub use error::{ConfigError, PoolError, QueryError};
pub use models::{Coordinate, FeatureCollection, TableName};
pub use sqlx::PgPool;
