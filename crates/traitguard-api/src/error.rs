//! # API Error Types
//!
//! Failures that end a webhook request before a decision is reached. Each
//! maps to one status code and a JSON body:
//!
//! ```json
//! { "error": { "code": "INVALID_JSON", "message": "Invalid JSON: ..." } }
//! ```
//!
//! Read-only violations are not errors; they are a 409 decision produced by
//! the hook handler itself.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use traitguard_schema_client::SchemaLookupError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body is not a valid webhook payload (400).
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Schema id cannot be looked up (400).
    #[error("Invalid schema id: {0}")]
    InvalidSchemaId(String),

    /// Schema registry lookup failed (500). The reason is included in the body.
    #[error("Failed to obtain schema immutable traits: {0}")]
    SchemaLookup(#[from] SchemaLookupError),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidJson(_) => (StatusCode::BAD_REQUEST, "INVALID_JSON"),
            Self::InvalidSchemaId(_) => (StatusCode::BAD_REQUEST, "INVALID_SCHEMA_ID"),
            Self::SchemaLookup(e) if e.is_malformed() => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SCHEMA_MALFORMED")
            }
            Self::SchemaLookup(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SCHEMA_UNAVAILABLE"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            Self::InvalidJson(detail) | Self::InvalidSchemaId(detail) => {
                tracing::info!(%detail, "rejecting malformed webhook request")
            }
            Self::SchemaLookup(e) => tracing::error!(error = %e, "schema lookup failed"),
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}
