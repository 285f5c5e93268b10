//! Schema registry client configuration.
//!
//! Built once at startup from the environment (or explicitly in tests) and
//! handed to [`SchemaRegistryClient::new`](crate::SchemaRegistryClient::new).

use traitguard_core::DEFAULT_READONLY_ANNOTATION;
use url::Url;

/// Default HTTP timeout for schema lookups, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the schema registry client.
#[derive(Debug, Clone)]
pub struct SchemaRegistryConfig {
    /// Registry base URL. Schemas are fetched from `{base_url}/schemas/{id}`.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Trait metadata key that marks a trait read-only.
    pub readonly_annotation: String,
}

impl SchemaRegistryConfig {
    /// Configuration with default timeout and annotation.
    pub fn new(base_url: Url) -> Result<Self, ConfigError> {
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(
                "KRATOS_PUBLIC_URL".to_string(),
                format!("{base_url} cannot be used as a base URL"),
            ));
        }
        Ok(Self {
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            readonly_annotation: DEFAULT_READONLY_ANNOTATION.to_string(),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `KRATOS_PUBLIC_URL` (required)
    /// - `SCHEMA_REGISTRY_TIMEOUT_SECS` (default: 30)
    /// - `READONLY_ANNOTATION` (default: `zolfa.dev/kratos-readonly`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = var("KRATOS_PUBLIC_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;
        let base_url = Url::parse(raw.trim())
            .map_err(|e| ConfigError::InvalidUrl("KRATOS_PUBLIC_URL".to_string(), e.to_string()))?;

        let mut config = Self::new(base_url)?;
        if let Some(secs) = var("SCHEMA_REGISTRY_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            config.timeout_secs = secs;
        }
        if let Some(annotation) = var("READONLY_ANNOTATION").filter(|s| !s.is_empty()) {
            config.readonly_annotation = annotation;
        }
        Ok(config)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("KRATOS_PUBLIC_URL environment variable is required")]
    MissingBaseUrl,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
