#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard configuration.
//!
//! The defaults live in `dashboard.toml`, which is baked into the binary
//! at compile time via [`include_str!`]. A user-supplied TOML file
//! replaces it wholesale; missing sections fall back to the defaults.
//! Environment variables are applied last:
//!
//! - `CRIME_DASHBOARD_DATA`: path to the incident CSV
//! - `BIND_ADDR`: server bind address
//! - `PORT`: server port

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration embedded at compile time.
const DEFAULT_CONFIG_TOML: &str = include_str!("../dashboard.toml");

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`DashboardConfig`].
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override could not be parsed.
    #[error("Invalid value for {name}: {value}")]
    Env {
        /// Name of the environment variable.
        name: &'static str,
        /// The offending value.
        value: String,
    },
}

/// How the loader treats a repeated incident number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the load.
    #[default]
    Reject,
    /// Keep the first row with a given number and drop the rest.
    KeepFirst,
}

/// Where the incident data comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the incident CSV.
    pub path: PathBuf,
    /// Handling of repeated incident numbers.
    pub duplicate_ids: DuplicatePolicy,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/bostoncrime.csv"),
            duplicate_ids: DuplicatePolicy::Reject,
        }
    }
}

/// Sizes of the top-N lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Number of streets in each of the most/least ranking tables.
    pub street_ranking: usize,
    /// Number of slices in the top offense pie.
    pub top_offenses: usize,
    /// Number of (offense, month) entries per street pie.
    pub street_view: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            street_ranking: 5,
            top_offenses: 10,
            street_view: 10,
        }
    }
}

/// Map rendering hints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Initial zoom level handed to the map renderer.
    pub zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { zoom: 12.0 }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset source.
    pub dataset: DatasetConfig,
    /// Top-N sizes.
    pub limits: LimitsConfig,
    /// Map hints.
    pub map: MapConfig,
    /// HTTP server.
    pub server: ServerConfig,
}

impl DashboardConfig {
    /// Loads the configuration from `path`, or from the embedded defaults
    /// when `path` is `None`, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or if
    /// an environment override is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml(&contents)?
            }
            None => Self::embedded()?,
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parses the embedded default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the embedded TOML is invalid.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml(DEFAULT_CONFIG_TOML)
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies overrides looked up by variable name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if `PORT` is not a valid port number.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(path) = lookup("CRIME_DASHBOARD_DATA") {
            self.dataset.path = PathBuf::from(path);
        }
        if let Some(bind_addr) = lookup("BIND_ADDR") {
            self.server.bind_addr = bind_addr;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::Env {
                name: "PORT",
                value: port,
            })?;
        }
        Ok(())
    }
}
