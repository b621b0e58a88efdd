//! Listener and CORS settings.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use http::HeaderValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Origin allowed when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Port the service listens on by default.
pub const DEFAULT_PORT: u16 = 8081;

const WILDCARD_ORIGIN: &str = "*";

/// A CORS configuration that cannot be served.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorsConfigError {
    /// `*` cannot be echoed as an allowed origin.
    #[error("wildcard CORS origin '*' is not supported; list each allowed origin")]
    WildcardOrigin,
}

/// Where the service listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: IpAddr,
    /// TCP port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Socket address to bind.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Cross-origin settings for browser front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to call the service.
    pub allowed_origins: Vec<String>,
    /// Whether browsers may send credentials.
    pub allow_credentials: bool,
    /// How long browsers may cache a preflight response, in seconds.
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![DEFAULT_ORIGIN.to_string()],
            allow_credentials: true,
            max_age_seconds: 3600,
        }
    }
}

impl CorsConfig {
    /// Preflight cache lifetime.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Reject settings the CORS layer cannot honor.
    pub fn validate(&self) -> Result<(), CorsConfigError> {
        if self.allowed_origins.iter().any(|o| is_wildcard(o)) {
            return Err(CorsConfigError::WildcardOrigin);
        }
        Ok(())
    }

    /// Configured origins as header values, falling back to [`DEFAULT_ORIGIN`].
    ///
    /// Origins that are not valid header values, and the `*` wildcard, are
    /// skipped with a warning.
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) if !is_wildcard(origin) => Some(value),
                _ => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        if origins.is_empty() {
            vec![HeaderValue::from_static(DEFAULT_ORIGIN)]
        } else {
            origins
        }
    }
}

fn is_wildcard(origin: &str) -> bool {
    origin.trim() == WILDCARD_ORIGIN
}
