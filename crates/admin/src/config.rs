//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_AUTH_USERS` - Identity directory spec,
//!   `email:password:Display Name` entries separated by `;`
//!
//! ## Optional
//! - `SCUDERIA_DATA_DIR` - Data directory shared with the showroom binary
//!   (default: `data`)
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_SYNC_INTERVAL_SECS` - Inventory reconciliation poll interval
//!   (default: 5)
//! - `ADMIN_AUTH_ALLOWED_DOMAIN` - Restrict sign-in to one email domain
//! - `ADMIN_AUTH_INTERACTIVE` - Whether the interactive (popup-style)
//!   sign-in flow is available (default: true). When false, the primary
//!   flow reports "blocked" and the glue falls back to the redirect-style
//!   flow, mirroring environments where popups are unavailable.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Directory holding the JSON documents shared with the showroom binary.
    pub data_dir: PathBuf,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Seconds between inventory reconciliation polls
    pub sync_interval_secs: u64,
    /// Identity provider configuration
    pub auth: AuthConfig,
}

/// Identity provider configuration.
///
/// Implements `Debug` manually to redact the directory spec, which carries
/// passwords.
#[derive(Clone)]
pub struct AuthConfig {
    /// Directory spec, `email:password:Display Name` entries joined by `;`
    pub users: SecretString,
    /// Only accounts under this email domain may sign in
    pub allowed_domain: Option<String>,
    /// Whether the interactive (popup-style) flow is available
    pub interactive: bool,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("users", &"[REDACTED]")
            .field("allowed_domain", &self.allowed_domain)
            .field("interactive", &self.interactive)
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("SCUDERIA_DATA_DIR", "data"));
        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let sync_interval_secs = get_env_or_default("ADMIN_SYNC_INTERVAL_SECS", "5")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ADMIN_SYNC_INTERVAL_SECS".to_string(), e.to_string())
            })?;

        let auth = AuthConfig::from_env()?;

        Ok(Self {
            data_dir,
            host,
            port,
            sync_interval_secs,
            auth,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let users = get_required_env("ADMIN_AUTH_USERS").map(SecretString::from)?;
        let allowed_domain = get_optional_env("ADMIN_AUTH_ALLOWED_DOMAIN");
        let interactive = get_env_or_default("ADMIN_AUTH_INTERACTIVE", "true")
            .parse::<bool>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ADMIN_AUTH_INTERACTIVE".to_string(), e.to_string())
            })?;

        Ok(Self {
            users,
            allowed_domain,
            interactive,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
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
    fn test_auth_config_debug_redacts_users() {
        let auth = AuthConfig {
            users: SecretString::from("boss@scuderia.example:hunter2:Boss"),
            allowed_domain: Some("scuderia.example".to_string()),
            interactive: true,
        };

        let debug_output = format!("{auth:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn test_socket_addr() {
        let config = AdminConfig {
            data_dir: PathBuf::from("data"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            sync_interval_secs: 5,
            auth: AuthConfig {
                users: SecretString::from("boss@scuderia.example:pw:Boss"),
                allowed_domain: None,
                interactive: true,
            },
        };

        assert_eq!(config.socket_addr().port(), 3001);
    }
}
