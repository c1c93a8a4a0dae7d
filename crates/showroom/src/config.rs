//! Showroom configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SCUDERIA_DATA_DIR` - Data directory shared with the admin binary
//!   (default: `data`)
//! - `SHOWROOM_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOWROOM_PORT` - Listen port (default: 3000)
//! - `SHOWROOM_SYNC_INTERVAL_SECS` - Inventory reconciliation poll interval
//!   (default: 5)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Showroom application configuration.
#[derive(Debug, Clone)]
pub struct ShowroomConfig {
    /// Directory holding the JSON documents shared with the admin binary.
    pub data_dir: PathBuf,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Seconds between inventory reconciliation polls
    pub sync_interval_secs: u64,
}

impl ShowroomConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("SCUDERIA_DATA_DIR", "data"));
        let host = get_env_or_default("SHOWROOM_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOWROOM_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SHOWROOM_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOWROOM_PORT".to_string(), e.to_string()))?;
        let sync_interval_secs = get_env_or_default("SHOWROOM_SYNC_INTERVAL_SECS", "5")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOWROOM_SYNC_INTERVAL_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            data_dir,
            host,
            port,
            sync_interval_secs,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = ShowroomConfig {
            data_dir: PathBuf::from("data"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            sync_interval_secs: 5,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
