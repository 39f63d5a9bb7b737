//! Error types for cardsheet

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`CardConfig`](crate::CardConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for a card config
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be written back out
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Values parse but describe an impossible card
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for cardsheet operations
pub type Result<T> = std::result::Result<T, ConfigError>;
