//! Order API configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use pharma_db::DbConfig;
use serde::{Deserialize, Serialize};
use std::env;

/// Order API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface the HTTP server binds to
    pub host: String,

    /// HTTP server port
    pub port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Upper bound on pooled SQLite connections
    pub db_max_connections: u32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            host: lookup("PHARMA_API_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),

            port: lookup("PHARMA_API_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PHARMA_API_PORT".to_string()))?,

            database_path: lookup("PHARMA_DB_PATH").unwrap_or_else(|| "./pharma.db".to_string()),

            db_max_connections: lookup("PHARMA_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PHARMA_DB_MAX_CONNECTIONS".to_string()))?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "PHARMA_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.db_max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, "./pharma.db");
        assert_eq!(config.db_max_connections, 5);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("PHARMA_API_HOST", "0.0.0.0"),
            ("PHARMA_API_PORT", "9000"),
            ("PHARMA_DB_PATH", "/var/lib/pharma/orders.db"),
            ("PHARMA_DB_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.db_max_connections, 12);
        assert_eq!(
            config.db_config().path().and_then(|p| p.to_str()),
            Some("/var/lib/pharma/orders.db")
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = ApiConfig::from_lookup(lookup(&[("PHARMA_API_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(name) if name == "PHARMA_API_PORT"));
    }

    #[test]
    fn test_zero_connections_rejected() {
        assert!(ApiConfig::from_lookup(lookup(&[("PHARMA_DB_MAX_CONNECTIONS", "0")])).is_err());
    }
}
