//! Schema lookup error types.

/// Errors from schema registry lookups.
///
/// `Unavailable` and `UnexpectedStatus` both mean the registry could not
/// serve the schema; `Malformed` means it answered with something that is
/// not an identity schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaLookupError {
    /// Transport failure: connection refused, timeout, truncated body.
    #[error("schema registry unavailable calling {endpoint}: {source}")]
    Unavailable {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Registry returned a non-2xx status.
    #[error("schema registry {endpoint} returned {status}: {body}")]
    UnexpectedStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response body is not a parsable identity schema.
    #[error("failed to decode schema from {endpoint}: {source}")]
    Malformed {
        endpoint: String,
        source: serde_json::Error,
    },
    /// The HTTP client could not be built.
    #[error("failed to build schema registry HTTP client: {0}")]
    ClientInit(reqwest::Error),
    /// Schema id cannot be addressed as a single path segment.
    #[error("schema id {0:?} does not name a schema")]
    InvalidSchemaId(String),
    /// Client construction or URL building failed.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl SchemaLookupError {
    /// `true` when the registry could not be reached or refused the request.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::UnexpectedStatus { .. })
    }

    /// `true` when the schema id was refused before any request was made.
    pub fn is_invalid_schema_id(&self) -> bool {
        matches!(self, Self::InvalidSchemaId(_))
    }

    /// `true` when the registry answered with an unparsable schema.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}
