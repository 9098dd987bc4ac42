//! Error types for storage operations

use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error from the runtime state store
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Filesystem error from the configuration store
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file did not parse
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
