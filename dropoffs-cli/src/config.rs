//! Command-line and environment configuration
//!
//! Every flag falls back to an environment variable, so a container can be
//! configured purely through its environment (optionally via `./.env`).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use dropoffs_server::config::{
    DEFAULT_MAX_IDLE, DEFAULT_MAX_LIFETIME_SECS, DEFAULT_MAX_OPEN, DEFAULT_RADIUS_MILES,
    DEFAULT_ROW_LIMIT,
};
use dropoffs_server::models::DEFAULT_TABLE;
use dropoffs_server::{
    create_pool, ConnectMode, ConnectSettings, PgPool, PoolConfig, QuerySettings, TableName,
};

/// Database connection and pool limits
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Database host; setting it selects TCP mode (user, password, port and name become required)
    #[arg(long = "db-host", env = "DB_TCP_HOST")]
    pub tcp_host: Option<String>,

    /// Database user
    #[arg(long = "db-user", env = "DB_USER")]
    pub user: Option<String>,

    /// Database password
    #[arg(long = "db-password", env = "DB_PASS", hide_env_values = true)]
    pub password: Option<String>,

    /// Database port (TCP mode)
    #[arg(id = "db_port", long = "db-port", env = "DB_PORT")]
    pub port: Option<String>,

    /// Database name
    #[arg(long = "db-name", env = "DB_NAME")]
    pub database: Option<String>,

    /// Unix socket directory (local socket mode)
    #[arg(long = "db-socket-dir", env = "DB_SOCKET_DIR")]
    pub socket_dir: Option<PathBuf>,

    /// Maximum idle connections kept in the pool
    #[arg(long, env = "DB_MAX_IDLE", default_value_t = DEFAULT_MAX_IDLE)]
    pub max_idle: u32,

    /// Maximum open connections
    #[arg(long, env = "DB_MAX_OPEN", default_value_t = DEFAULT_MAX_OPEN)]
    pub max_open: u32,

    /// Maximum connection lifetime in seconds
    #[arg(long, env = "DB_MAX_LIFETIME_SECS", default_value_t = DEFAULT_MAX_LIFETIME_SECS)]
    pub max_lifetime_secs: u64,
}

impl DbArgs {
    pub fn connect_settings(&self) -> ConnectSettings {
        ConnectSettings {
            tcp_host: self.tcp_host.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            port: self.port.clone(),
            database: self.database.clone(),
            socket_dir: self.socket_dir.clone(),
        }
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            max_idle: self.max_idle,
            max_open: self.max_open,
            max_lifetime_secs: self.max_lifetime_secs,
        }
    }

    /// Resolve the connection mode and check pool limits without connecting.
    pub fn validate(&self) -> Result<(ConnectMode, PoolConfig)> {
        let mode = self
            .connect_settings()
            .resolve()
            .context("invalid database configuration")?;
        let pool = self.pool_config();
        pool.validate().context("invalid pool configuration")?;
        Ok((mode, pool))
    }

    /// Open the pool; any error here is fatal for the caller.
    pub async fn open_pool(&self) -> Result<PgPool> {
        let (mode, config) = self.validate()?;
        create_pool(&config, &mode)
            .await
            .context("failed to open database pool")
    }
}

/// Proximity query tuning
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Spatial table holding drop-off locations
    #[arg(long, env = "DROPOFFS_TABLE", default_value = DEFAULT_TABLE)]
    pub table: String,

    /// Search radius in miles
    #[arg(long, env = "DROPOFFS_RADIUS_MILES", default_value_t = DEFAULT_RADIUS_MILES)]
    pub radius_miles: f64,

    /// Number of nearest rows ranked before the radius filter
    #[arg(long, env = "DROPOFFS_LIMIT", default_value_t = DEFAULT_ROW_LIMIT)]
    pub limit: i64,

    /// Per-query timeout in seconds (unset waits for the store)
    #[arg(long, env = "DROPOFFS_QUERY_TIMEOUT_SECS")]
    pub query_timeout_secs: Option<u64>,
}

impl QueryArgs {
    pub fn settings(&self) -> Result<QuerySettings> {
        let table = TableName::new(&self.table).context("invalid DROPOFFS_TABLE")?;
        let settings = QuerySettings::default()
            .with_table(table)
            .with_radius_miles(self.radius_miles)
            .context("invalid DROPOFFS_RADIUS_MILES")?
            .with_row_limit(self.limit)
            .context("invalid DROPOFFS_LIMIT")?
            .with_timeout(self.query_timeout_secs.map(Duration::from_secs));
        Ok(settings)
    }
}
