//! # Configuration
//!
//! Settings for the hato client, resolved in three layers (later wins):
//!
//! 1. Built-in defaults (`http://localhost:3001/api`, no token)
//! 2. An optional TOML file (`hato.toml` next to the binary, or `--config`)
//! 3. Environment variables: `HATO_API_URL`, `HATO_API_TOKEN`
//!
//! Empty or whitespace-only values are treated as unset, so an exported but
//! blank `HATO_API_TOKEN` does not silently disable anonymous access.

use serde::Deserialize;
use std::path::Path;

/// Default API base URL when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Resolved client settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Base URL of the livestock API, including the `/api` prefix.
    pub api_url: String,
    /// Bearer token sent with every request; `None` means anonymous.
    pub api_token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
        }
    }
}

/// Errors from reading or parsing a settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Settings {
    /// Resolve settings: defaults, then the config file (if any), then
    /// environment overrides.
    ///
    /// A missing explicit `--config` file is an error; a missing implicit
    /// `hato.toml` is not.
    pub fn resolve(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let implicit = Path::new("hato.toml");
                if implicit.exists() {
                    Self::from_file(implicit)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(url) = non_empty_env("HATO_API_URL") {
            settings.api_url = url;
        }
        if let Some(token) = non_empty_env("HATO_API_TOKEN") {
            settings.api_token = Some(token);
        }

        Ok(settings)
    }

    /// Load settings from a TOML file, with defaults for absent keys.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

// =============================================================================
// TESTS
// =============================================================================
