//! # traitguard-schema-client: Identity Schema Registry Client
//!
//! Fetches identity schemas from the registry (the identity server's public
//! API) and reduces them to the set of read-only trait names.
//!
//! ## API Path Convention
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `{base_url}/schemas/{schema_id}` | Fetch identity schema |
//!
//! The schema id is appended as one percent-encoded path segment, so ids
//! containing `/` or `?` stay inside the `/schemas/` prefix. The empty id and
//! the dot segments `.` and `..` would be dropped or collapsed by URL
//! normalization, so [`validate_schema_id`] refuses them.
//!
//! ## Failure Model
//!
//! One request per lookup, no retries. Every failure is returned to the
//! caller as a [`SchemaLookupError`]; the webhook turns it into a 500.

pub mod config;
pub mod error;

pub use config::{ConfigError, SchemaRegistryConfig};
pub use error::SchemaLookupError;

use std::time::Duration;

use traitguard_core::{IdentitySchema, ImmutableTraits};
use url::Url;

/// Refuse schema ids that do not map to exactly one `/schemas/{id}` segment.
pub fn validate_schema_id(schema_id: &str) -> Result<(), SchemaLookupError> {
    match schema_id {
        "" | "." | ".." => Err(SchemaLookupError::InvalidSchemaId(schema_id.to_string())),
        _ => Ok(()),
    }
}

/// Client for the identity schema registry.
///
/// Cheap to clone: the inner `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct SchemaRegistryClient {
    http: reqwest::Client,
    base_url: Url,
    readonly_annotation: String,
}

impl SchemaRegistryClient {
    /// Create a new client from configuration.
    pub fn new(config: SchemaRegistryConfig) -> Result<Self, SchemaLookupError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(SchemaLookupError::ClientInit)?;

        Ok(Self {
            http,
            base_url: config.base_url,
            readonly_annotation: config.readonly_annotation,
        })
    }

    /// Registry base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch and parse the identity schema `schema_id`.
    ///
    /// Calls `GET {base_url}/schemas/{schema_id}`.
    pub async fn fetch_schema(&self, schema_id: &str) -> Result<IdentitySchema, SchemaLookupError> {
        let url = self.schema_url(schema_id)?;
        let endpoint = format!("GET {url}");
        tracing::debug!(%url, "fetching identity schema");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SchemaLookupError::Unavailable {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SchemaLookupError::UnexpectedStatus {
                endpoint,
                status,
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| SchemaLookupError::Unavailable {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        serde_json::from_slice(&bytes).map_err(|e| SchemaLookupError::Malformed {
            endpoint,
            source: e,
        })
    }

    /// Names of the traits schema `schema_id` marks read-only.
    pub async fn immutable_traits(
        &self,
        schema_id: &str,
    ) -> Result<ImmutableTraits, SchemaLookupError> {
        let schema = self.fetch_schema(schema_id).await?;
        let immutable = ImmutableTraits::from_schema(&schema, &self.readonly_annotation);
        tracing::debug!(
            schema_id,
            read_only = immutable.len(),
            "identity schema fetched"
        );
        Ok(immutable)
    }

    fn schema_url(&self, schema_id: &str) -> Result<Url, SchemaLookupError> {
        validate_schema_id(schema_id)?;
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ConfigError::InvalidUrl(
                    "KRATOS_PUBLIC_URL".to_string(),
                    format!("{} cannot be used as a base URL", self.base_url),
                )
            })?
            .pop_if_empty()
            .push("schemas")
            .push(schema_id);
        Ok(url)
    }
}
