//! Pool, connection and query configuration
//!
//! Values arrive as raw optional strings (from flags or the environment)
//! and are resolved here into typed settings. Nothing in this module reads
//! the process environment or exits the process.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::models::{TableName, ValidationError};

pub const ENV_TCP_HOST: &str = "DB_TCP_HOST";
pub const ENV_USER: &str = "DB_USER";
pub const ENV_PASSWORD: &str = "DB_PASS";
pub const ENV_PORT: &str = "DB_PORT";
pub const ENV_DATABASE: &str = "DB_NAME";

pub const DEFAULT_MAX_IDLE: u32 = 5;
pub const DEFAULT_MAX_OPEN: u32 = 7;
pub const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

/// Fixed conversion used for the radius threshold.
pub const MILES_TO_METERS: f64 = 1609.0;
pub const DEFAULT_RADIUS_MILES: f64 = 10.0;
/// Size of the ranked candidate set before the radius filter applies.
pub const DEFAULT_ROW_LIMIT: i64 = 25;

// ============================================================================
// Pool limits
// ============================================================================

/// Connection pool limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum connections kept idle in the pool
    pub max_idle: u32,
    /// Maximum connections open at once (idle + in use)
    pub max_open: u32,
    /// Maximum age of a connection before it is closed
    pub max_lifetime_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle: DEFAULT_MAX_IDLE,
            max_open: DEFAULT_MAX_OPEN,
            max_lifetime_secs: DEFAULT_MAX_LIFETIME_SECS,
        }
    }
}

impl PoolConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_open == 0 {
            return Err(ConfigError::Invalid {
                key: "max_open",
                reason: "must allow at least one connection".into(),
            });
        }

        if self.max_idle > self.max_open {
            return Err(ConfigError::Invalid {
                key: "max_idle",
                reason: format!(
                    "{} idle connections exceeds max_open of {}",
                    self.max_idle, self.max_open
                ),
            });
        }

        if self.max_lifetime_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "max_lifetime_secs",
                reason: "must be greater than zero".into(),
            });
        }

        Ok(())
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }
}

// ============================================================================
// Connection mode
// ============================================================================

/// Credentials for a TCP connection to the store
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkCredentials {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl fmt::Debug for NetworkCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkCredentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}

/// How the pool reaches the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectMode {
    /// TCP host/port with full credentials
    Network(NetworkCredentials),
    /// Unix domain socket; everything optional, libpq defaults apply
    LocalSocket {
        socket_dir: Option<PathBuf>,
        user: Option<String>,
        database: Option<String>,
    },
}

impl ConnectMode {
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Raw connection values, each possibly absent.
///
/// Empty or whitespace-only strings count as absent. Present values are used
/// as given; only the port is trimmed before parsing.
#[derive(Debug, Clone, Default)]
pub struct ConnectSettings {
    pub tcp_host: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub port: Option<String>,
    pub database: Option<String>,
    pub socket_dir: Option<PathBuf>,
}

impl ConnectSettings {
    /// Pick the connection mode and check its required values.
    ///
    /// A non-empty TCP host selects network mode, which then needs user,
    /// password, port and database name. Otherwise a local socket is used.
    pub fn resolve(&self) -> Result<ConnectMode, ConfigError> {
        let Some(host) = present(&self.tcp_host) else {
            return Ok(ConnectMode::LocalSocket {
                socket_dir: self.socket_dir.clone(),
                user: present(&self.user).map(str::to_owned),
                database: present(&self.database).map(str::to_owned),
            });
        };

        let user = required(&self.user, ENV_USER)?;
        let password = required(&self.password, ENV_PASSWORD)?;
        let port = required(&self.port, ENV_PORT)?;
        let database = required(&self.database, ENV_DATABASE)?;

        let port = port.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
            key: ENV_PORT,
            reason: format!("'{}' is not a TCP port number", port),
        })?;

        Ok(ConnectMode::Network(NetworkCredentials {
            user: user.to_owned(),
            password: password.to_owned(),
            host: host.to_owned(),
            port,
            database: database.to_owned(),
        }))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn required<'a>(value: &'a Option<String>, key: &'static str) -> Result<&'a str, ConfigError> {
    present(value).ok_or(ConfigError::Missing { key })
}

// ============================================================================
// Query settings
// ============================================================================

/// Parameters shared by every proximity query
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySettings {
    pub table: TableName,
    pub radius_meters: f64,
    pub row_limit: i64,
    /// Upper bound on a single query; `None` waits for the store
    pub timeout: Option<Duration>,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            table: TableName::default(),
            radius_meters: DEFAULT_RADIUS_MILES * MILES_TO_METERS,
            row_limit: DEFAULT_ROW_LIMIT,
            timeout: None,
        }
    }
}

impl QuerySettings {
    pub fn with_table(mut self, table: TableName) -> Self {
        self.table = table;
        self
    }

    pub fn with_radius_miles(mut self, miles: f64) -> Result<Self, ValidationError> {
        if !miles.is_finite() {
            return Err(ValidationError::NotFinite { field: "radius" });
        }
        if miles <= 0.0 {
            return Err(ValidationError::NotPositive { field: "radius" });
        }
        self.radius_meters = miles * MILES_TO_METERS;
        Ok(self)
    }

    pub fn with_row_limit(mut self, limit: i64) -> Result<Self, ValidationError> {
        if limit <= 0 {
            return Err(ValidationError::NotPositive { field: "row limit" });
        }
        self.row_limit = limit;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
