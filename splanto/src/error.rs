//! Error types for splanto
//!
//! Every variant is fatal for the run. None of them are retried internally.

use thiserror::Error;

/// Main error type for the curation run
#[derive(Error, Debug)]
pub enum Error {
    /// Bad credentials, denied consent, or a token the service rejected
    #[error("Authorization failed: {0}")]
    AuthFailure(String),

    /// No playlist matched the marker (or the playlist vanished mid-run)
    #[error("\"{0}\" not found in playlists")]
    NotFound(String),

    /// An entry's added timestamp could not be read
    #[error("Malformed entry {entry}: {reason} (value: {value:?})")]
    MalformedEntry {
        entry: String,
        value: String,
        reason: String,
    },

    /// Network or API failure while talking to the service
    #[error("Service error: {0}")]
    TransientServiceError(String),

    /// Missing credentials or unreadable config file
    #[error(transparent)]
    Config(#[from] splanto_common::Error),

    /// Prompt or terminal I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::TransientServiceError(err.to_string())
    }
}

/// Convenience Result type using splanto Error
pub type Result<T> = std::result::Result<T, Error>;
