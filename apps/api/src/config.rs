//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so `cargo run -p busline-api` works out of the box.

use std::env;
use thiserror::Error;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port.
    pub port: u16,

    /// Path to the SQLite database file.
    pub database_path: String,

    /// Connection pool size.
    pub max_connections: u32,
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `BUSLINE_PORT` | `5000` |
    /// | `BUSLINE_DB` | `./busline.db` |
    /// | `BUSLINE_MAX_CONNECTIONS` | `5` |
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            port: env::var("BUSLINE_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BUSLINE_PORT".to_string()))?,

            database_path: env::var("BUSLINE_DB").unwrap_or_else(|_| "./busline.db".to_string()),

            max_connections: env::var("BUSLINE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BUSLINE_MAX_CONNECTIONS".to_string()))?,
        };

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Only meaningful when the env vars are unset, which is the normal
        // test environment.
        let config = ApiConfig::load().unwrap();
        assert_eq!(config.max_connections, 5);
        assert!(!config.database_path.is_empty());
    }
}
