//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (and a `.env` file, if present) on top of defaults.

use std::time::Duration;

use super::error::{Error, Result};
use super::transport::TransportConfig;
use crate::domains::tools::upstream::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Upstream provider settings.
    pub upstream: UpstreamConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// AMap web service key. There is no built-in fallback.
    pub amap_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "amap_api_key",
                &self.amap_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Upstream provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL every tool path is appended to.
    pub base_url: String,

    /// Per-request timeout in seconds. `None` keeps the HTTP client default.
    pub timeout_secs: Option<u64>,

    /// Reject enumeration values outside the declared set.
    pub strict_enums: bool,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            strict_enums: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "amap-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server name reported to clients.
    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server.name = name.into();
        self
    }

    /// Overlay environment variables (after loading `.env`) onto `self`.
    ///
    /// Variables are prefixed with `MCP_`, for example `MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_AMAP_API_KEY`.
    pub fn with_env(self) -> Self {
        dotenvy::dotenv().ok();
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable lookup onto `self`.
    pub fn with_vars<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = var("MCP_SERVER_NAME") {
            self.server.name = name;
        }

        if let Some(level) = var("MCP_LOG_LEVEL") {
            self.logging.level = level;
        }

        self.transport = TransportConfig::from_vars(&var);

        if let Some(api_key) = var("MCP_AMAP_API_KEY").or_else(|| var("AMAP_MAPS_API_KEY")) {
            self.credentials.amap_api_key = Some(api_key);
        }

        if let Some(base_url) = var("MCP_AMAP_BASE_URL") {
            self.upstream.base_url = base_url;
        }

        if let Some(timeout) = var("MCP_UPSTREAM_TIMEOUT_SECS") {
            self.upstream.timeout_secs = timeout.parse().ok().filter(|secs| *secs > 0);
        }

        if let Some(strict) = var("MCP_STRICT_ENUMS") {
            self.upstream.strict_enums = !matches!(strict.to_lowercase().as_str(), "false" | "0" | "no");
        }

        self
    }

    /// The AMap credential, or a configuration error if none was supplied.
    pub fn api_key(&self) -> Result<&str> {
        self.credentials
            .amap_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                Error::config("AMap API key missing: set MCP_AMAP_API_KEY (or AMAP_MAPS_API_KEY)")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_credentials_from_vars() {
        let config = Config::new().with_vars(lookup(&[("MCP_AMAP_API_KEY", "test_key_12345")]));
        assert_eq!(config.api_key().unwrap(), "test_key_12345");
    }

    #[test]
    fn test_credentials_fallback_variable() {
        let config = Config::new().with_vars(lookup(&[("AMAP_MAPS_API_KEY", "fallback")]));
        assert_eq!(config.api_key().unwrap(), "fallback");

        let config = Config::new().with_vars(lookup(&[
            ("AMAP_MAPS_API_KEY", "fallback"),
            ("MCP_AMAP_API_KEY", "primary"),
        ]));
        assert_eq!(config.api_key().unwrap(), "primary");
    }

    #[test]
    fn test_missing_credential_is_config_error() {
        let config = Config::new().with_vars(lookup(&[]));
        assert!(matches!(config.api_key(), Err(Error::Config(_))));

        let config = Config::new().with_vars(lookup(&[("MCP_AMAP_API_KEY", "  ")]));
        assert!(config.api_key().is_err());
    }

    #[test]
    fn test_no_default_credential() {
        assert!(Config::default().credentials.amap_api_key.is_none());
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            amap_api_key: Some("super_secret_key".to_string()),
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }

    #[test]
    fn test_upstream_settings() {
        let config = Config::new().with_vars(lookup(&[
            ("MCP_AMAP_BASE_URL", "http://127.0.0.1:9000"),
            ("MCP_UPSTREAM_TIMEOUT_SECS", "15"),
            ("MCP_STRICT_ENUMS", "false"),
        ]));
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.upstream.timeout(), Some(Duration::from_secs(15)));
        assert!(!config.upstream.strict_enums);
    }

    #[test]
    fn test_upstream_defaults() {
        let config = Config::new().with_vars(lookup(&[("MCP_UPSTREAM_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.upstream.base_url, "https://restapi.amap.com");
        assert_eq!(config.upstream.timeout(), None);
        assert!(config.upstream.strict_enums);
    }

    #[test]
    fn test_server_name_override() {
        let config = Config::new().with_server_name("amap-route-mcp");
        assert_eq!(config.server.name, "amap-route-mcp");

        let config = config.with_vars(lookup(&[("MCP_SERVER_NAME", "custom")]));
        assert_eq!(config.server.name, "custom");
    }
}
