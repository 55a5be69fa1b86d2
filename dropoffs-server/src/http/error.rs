//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Store errors are logged in full and answered with a generic message.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::QueryError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Inbound coordinate failed validation (400)
    Validation(ValidationError),

    /// Store or adapter failure (500, logged)
    Query(QueryError),

    /// Query exceeded its time limit (504)
    Timeout { limit: Duration },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::Query(e) => {
                // Log the actual error, return generic message
                tracing::error!(error = %e, "proximity query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
            Self::Timeout { limit } => {
                tracing::warn!(limit_secs = limit.as_secs_f64(), "proximity query timed out");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    json!({
                        "error": "timeout",
                        "message": format!("query timed out after {} seconds", limit.as_secs_f64())
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::InvalidCoordinate(e) => Self::Validation(e),
            QueryError::Timeout { limit } => Self::Timeout { limit },
            other => Self::Query(other),
        }
    }
}
