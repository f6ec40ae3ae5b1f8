//! Startup configuration.
//!
//! The listening port comes from the `WOPR_PORT` environment variable; the
//! bind host and log level come from the command line; animation timings
//! use [`RenderConfig`] defaults.

use wopr_core::RenderConfig;

use crate::ConfigError;

/// Port used when `WOPR_PORT` is unset or empty.
pub const DEFAULT_PORT: u16 = 2000;

/// Environment variable overriding the listening port.
pub const PORT_ENV: &str = "WOPR_PORT";

/// Network mode configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host or address to bind (e.g., "0.0.0.0").
    pub bind_host: String,
    /// TCP port.
    pub port: u16,
    /// Animation timings for every session.
    pub render: RenderConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_host: "0.0.0.0".to_string(), port: DEFAULT_PORT, render: RenderConfig::default() }
    }
}

impl ServerConfig {
    /// Configuration for `bind_host`, with the port read from `WOPR_PORT`.
    pub fn from_env(bind_host: impl Into<String>) -> Result<Self, ConfigError> {
        let port = parse_port(std::env::var(PORT_ENV).ok().as_deref())?;
        Ok(Self { bind_host: bind_host.into(), port, ..Self::default() })
    }

    /// `host:port` string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

/// Parse a raw `WOPR_PORT` value. `None` and empty fall back to
/// [`DEFAULT_PORT`].
pub fn parse_port(value: Option<&str>) -> Result<u16, ConfigError> {
    match value {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidPort {
            value: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}
