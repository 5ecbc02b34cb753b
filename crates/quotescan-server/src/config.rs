//! Server configuration from environment variables.

use quotescan_core::extraction::Backend;
use std::net::SocketAddr;

/// Request body limit for uploads when `QUOTESCAN_MAX_UPLOAD_BYTES` is unset.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub backend: Backend,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            backend: Backend::default(),
        }
    }
}

impl ServerConfig {
    /// Read `QUOTESCAN_HOST`, `QUOTESCAN_PORT`, `QUOTESCAN_MAX_UPLOAD_BYTES`
    /// and `QUOTESCAN_BACKEND`, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = ServerConfig::default();

        if let Some(host) = lookup("QUOTESCAN_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("QUOTESCAN_PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "QUOTESCAN_PORT",
                expected: "a valid port number",
                value: port.clone(),
            })?;
        }
        if let Some(limit) = lookup("QUOTESCAN_MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = limit.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "QUOTESCAN_MAX_UPLOAD_BYTES",
                expected: "a byte count",
                value: limit.clone(),
            })?;
        }
        if let Some(backend) = lookup("QUOTESCAN_BACKEND") {
            config.backend = backend.parse().map_err(|_| ConfigError::Invalid {
                name: "QUOTESCAN_BACKEND",
                expected: "'bbox' or 'layout'",
                value: backend.clone(),
            })?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::Invalid {
            name: "QUOTESCAN_HOST",
            expected: "an IP address",
            value: self.host.clone(),
        })
    }
}
