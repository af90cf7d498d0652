//! Client configuration.
//!
//! Values are layered, later sources winning:
//! 1. built-in defaults
//! 2. a TOML file (`wardrobe.toml` in the working directory, or an explicit path)
//! 3. `WARDROBE_*` environment variables, `__` separating nested keys
//!    (`WARDROBE_SETTINGS__FALLBACK_IMAGE`)
//!
//! The token file defaults to the platform config directory:
//! - Linux: ~/.config/wardrobe/tokens.json
//! - macOS: ~/Library/Application Support/wardrobe/tokens.json
//! - Windows: %APPDATA%/wardrobe/tokens.json

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use wardrobe_domain::SessionSettings;

use crate::adapters::DEFAULT_USER_AGENT;

/// Config file read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "wardrobe.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "WARDROBE";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or the result did not fit the schema.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
}

/// Everything needed to build a session against one backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend root URL; endpoints are resolved against it.
    pub base_url: String,
    /// Where the token pair is persisted.
    pub token_file: PathBuf,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Endpoint paths and fallbacks.
    pub settings: SessionSettings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            token_file: default_token_file(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            settings: SessionSettings::default(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the file and the process environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is unreadable or a value has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let file = path.map_or_else(
            || File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
            |path| File::from(path).required(true),
        );

        let config = Config::builder().add_source(file).add_source(env).build()?;
        Ok(config.try_deserialize()?)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Returns the default token file location.
#[must_use]
pub fn default_token_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wardrobe")
        .join("tokens.json")
}
