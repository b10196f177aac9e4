//! Common error types for splanto

use thiserror::Error;

/// Common result type for splanto operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared across the workspace
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML or has the wrong shape
    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input value
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
