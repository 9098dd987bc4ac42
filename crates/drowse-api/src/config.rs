//! Configuration file parsing for the control API server

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Control API configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Control API server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8484)
    pub bind_port: u16,
}

impl ApiConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ApiConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ApiConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8484,
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
        "#;
        let config: ApiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
    }

    #[test]
    fn test_bind_addr_joins_address_and_port() {
        let config = ApiConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8484");
    }

    #[test]
    fn test_missing_field_fails_to_parse() {
        let result: Result<ApiConfig, _> = toml::from_str("bind_address = \"127.0.0.1\"");
        assert!(result.is_err());
    }
}
