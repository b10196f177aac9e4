//! # splanto Common Library
//!
//! Shared code for the splanto workspace:
//! - Error type used by configuration and parsing helpers
//! - Credential resolution (CLI, environment, TOML config file)
//! - Timestamp utilities

pub mod config;
pub mod error;
pub mod time;

pub use config::Credentials;
pub use error::{Error, Result};
