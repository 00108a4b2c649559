//! Configuration loading.
//!
//! Configuration is optional. Every key has a default, so an empty file or
//! no file at all yields a working setup.
//!
//! Lookup order:
//!
//! 1. The path given on the command line, which must exist
//! 2. `<config dir>/kisetsu/config.toml` (e.g. `~/.config/kisetsu/config.toml`)
//! 3. Built-in defaults
//!
//! ```toml
//! [api]
//! base_url = "https://api.jikan.moe/v4"
//! sfw = true
//!
//! [catalog]
//! year = 2025
//! season = "summer"
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    net::DEFAULT_USER_AGENT,
    sources::{JIKAN_BASE_URL, JikanSource},
    types::Season,
};

/// Application directory name under the platform config and data dirs.
pub const APP_DIR: &str = "kisetsu";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// Catalog API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root without trailing slash
    pub base_url: String,
    /// Pass `sfw` on seasonal listings
    pub sfw: bool,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: JIKAN_BASE_URL.to_string(),
            sfw: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Which season the home page opens on. Unset fields follow the calendar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub year: Option<i32>,
    pub season: Option<Season>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write a log file at all
    pub enabled: bool,
    /// Default level (trace, debug, info, warn, error); `RUST_LOG` overrides it
    pub level: String,
    /// Log directory, defaults to `<data dir>/kisetsu/logs`
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Loads configuration following the lookup order above.
    ///
    /// # Errors
    ///
    /// * [`Error::Config`] - an explicit path is missing, or a file fails to parse
    /// * [`Error::Io`] - a file exists but cannot be read
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)
            }
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path),
                None => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Reads and parses one TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Platform config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Season and year the home page starts on.
    ///
    /// Missing values are taken from the current UTC date.
    pub fn resolved_season(&self) -> (i32, Season) {
        let (current_season, current_year) = Season::current();
        (
            self.catalog.year.unwrap_or(current_year),
            self.catalog.season.unwrap_or(current_season),
        )
    }

    /// Builds the catalog source described by `[api]`.
    pub fn source(&self) -> JikanSource {
        JikanSource::with_base_url(&self.api.base_url)
            .with_sfw(self.api.sfw)
            .with_user_agent(&self.api.user_agent)
    }
}
