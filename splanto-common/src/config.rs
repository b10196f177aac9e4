//! Configuration loading and credential resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable holding the Spotify application client id
pub const CLIENT_ID_ENV: &str = "SPLANTO_CLIENT_ID";

/// Environment variable holding the Spotify application client secret
pub const CLIENT_SECRET_ENV: &str = "SPLANTO_CLIENT_SECRET";

/// Application credentials for the streaming service
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Contents of `config.toml`
///
/// Every key is optional; a missing file is the same as an empty one.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TomlConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl TomlConfig {
    /// Parse a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load the explicit path if given, otherwise the platform default
    ///
    /// An explicit path that does not exist is an error. A missing default
    /// file is not, since most installs configure through the environment.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            });
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "Loading config file");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Default config file location: `<config_dir>/splanto/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("splanto").join("config.toml"))
}

/// Credential resolution in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
///
/// There is no compiled default; a value missing from all three is an error
/// naming the environment variable.
pub fn resolve_credentials(
    cli_client_id: Option<&str>,
    cli_client_secret: Option<&str>,
    toml: &TomlConfig,
) -> Result<Credentials> {
    let client_id = resolve_value(cli_client_id, CLIENT_ID_ENV, toml.client_id.as_deref())?;
    let client_secret = resolve_value(
        cli_client_secret,
        CLIENT_SECRET_ENV,
        toml.client_secret.as_deref(),
    )?;

    Ok(Credentials {
        client_id,
        client_secret,
    })
}

fn resolve_value(cli_arg: Option<&str>, env_var_name: &str, toml_value: Option<&str>) -> Result<String> {
    // Priority 1: Command-line argument
    if let Some(value) = non_empty(cli_arg) {
        return Ok(value.to_string());
    }

    // Priority 2: Environment variable
    if let Ok(value) = std::env::var(env_var_name) {
        if !value.trim().is_empty() {
            return Ok(value);
        }
    }

    // Priority 3: TOML config file
    if let Some(value) = non_empty(toml_value) {
        return Ok(value.to_string());
    }

    Err(Error::Config(format!("{} is not set", env_var_name)))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
