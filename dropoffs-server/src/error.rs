//! Error types for dropoffs-server
//!
//! Startup failures (`ConfigError`, `PoolError`) are returned to the caller,
//! which decides whether the process exits. `QueryError` is per request.

use std::time::Duration;

use thiserror::Error;

use crate::models::ValidationError;

/// Configuration value missing or unusable
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required configuration value {key} is not set")]
    Missing { key: &'static str },

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Connection pool could not be created
#[derive(Error, Debug)]
pub enum PoolError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("unable to open connection pool: {0}")]
    Connection(#[source] sqlx::Error),
}

/// A proximity lookup failed
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] ValidationError),

    #[error("query execution failed: {0}")]
    Execution(#[from] sqlx::Error),

    #[error("query returned no result row")]
    EmptyResult,

    #[error("aggregate document is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("query timed out after {}s", .limit.as_secs_f64())]
    Timeout { limit: Duration },
}
