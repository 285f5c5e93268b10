//! # Application State
//!
//! Configuration is read from the environment exactly once, in `main`, and
//! frozen into [`AppConfig`]. [`AppState`] is built from it and shared by all
//! handlers through the `State` extractor. Nothing in it is mutated after
//! startup except the Prometheus counters.

use traitguard_schema_client::{
    ConfigError, SchemaLookupError, SchemaRegistryClient, SchemaRegistryConfig,
};

use crate::middleware::metrics::ApiMetrics;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Log output format, chosen by `TRAITGUARD_LOG_FORMAT`.
///
/// Read separately from [`AppConfig`] because the subscriber is installed
/// before the rest of the configuration is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// `json` (any case) selects JSON lines; anything else is text.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        match var("TRAITGUARD_LOG_FORMAT") {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind on `0.0.0.0`.
    pub port: u16,
    /// Mount `/metrics` and the metrics middleware.
    pub metrics_enabled: bool,
    /// Schema registry connection settings.
    pub registry: SchemaRegistryConfig,
}

impl AppConfig {
    /// Configuration with defaults for everything but the registry.
    pub fn new(registry: SchemaRegistryConfig) -> Self {
        Self {
            port: DEFAULT_PORT,
            metrics_enabled: true,
            registry,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 3000)
    /// - `TRAITGUARD_METRICS_ENABLED` (default: true; only `false` disables)
    /// - everything [`SchemaRegistryConfig::from_env`] reads
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let registry = SchemaRegistryConfig::from_vars(&var)?;
        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let metrics_enabled = var("TRAITGUARD_METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);
        Ok(Self {
            port,
            metrics_enabled,
            registry,
        })
    }
}

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub schema_client: SchemaRegistryClient,
    pub metrics: ApiMetrics,
}

impl AppState {
    /// Build the state, constructing the schema registry client.
    pub fn new(config: AppConfig) -> Result<Self, SchemaLookupError> {
        let schema_client = SchemaRegistryClient::new(config.registry.clone())?;
        Ok(Self {
            config,
            schema_client,
            metrics: ApiMetrics::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn log_format_selection() {
        assert_eq!(LogFormat::from_vars(vars(&[])), LogFormat::Text);
        assert_eq!(
            LogFormat::from_vars(vars(&[("TRAITGUARD_LOG_FORMAT", "JSON")])),
            LogFormat::Json
        );
        assert_eq!(
            LogFormat::from_vars(vars(&[("TRAITGUARD_LOG_FORMAT", "pretty")])),
            LogFormat::Text
        );
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::from_vars(vars(&[("KRATOS_PUBLIC_URL", "http://kratos:4433")]))
            .unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert!(cfg.metrics_enabled);
        assert_eq!(cfg.registry.base_url.as_str(), "http://kratos:4433/");
    }

    #[test]
    fn port_and_metrics_overrides() {
        let cfg = AppConfig::from_vars(vars(&[
            ("KRATOS_PUBLIC_URL", "http://kratos:4433"),
            ("PORT", "8081"),
            ("TRAITGUARD_METRICS_ENABLED", "FALSE"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 8081);
        assert!(!cfg.metrics_enabled);
    }

    #[test]
    fn unparsable_port_falls_back() {
        let cfg = AppConfig::from_vars(vars(&[
            ("KRATOS_PUBLIC_URL", "http://kratos:4433"),
            ("PORT", "http"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
    }

    #[test]
    fn missing_registry_url_is_an_error() {
        let err = AppConfig::from_vars(vars(&[("PORT", "8081")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl));
    }

    #[test]
    fn state_builds_client() {
        let registry = SchemaRegistryConfig::new("http://kratos:4433".parse().unwrap()).unwrap();
        let state = AppState::new(AppConfig::new(registry)).unwrap();
        assert_eq!(state.schema_client.base_url().as_str(), "http://kratos:4433/");
    }
}
