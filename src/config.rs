//! Configuration management and validation.
//!
//! Provides the loader configuration (site, locations table, worker count,
//! log level) with layered loading: defaults, then an optional TOML file,
//! then environment variables, then CLI overrides.

use crate::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_LOG_LEVEL, DEFAULT_SITE, ENV_LOCATIONS, ENV_SITE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Buoy loading configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuoyConfig {
    /// Site identifier passed to the position resolver
    pub site: String,

    /// Optional `site, lon, lat` table for position lookups
    pub locations: Option<PathBuf>,

    /// Number of files loaded concurrently by the CLI
    pub workers: usize,

    /// Log level used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for BuoyConfig {
    fn default() -> Self {
        Self {
            site: DEFAULT_SITE.to_string(),
            locations: None,
            workers: num_cpus::get().max(1),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl BuoyConfig {
    /// Default config file location (working directory)
    pub fn default_config_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&contents).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load with layered configuration (defaults -> file -> environment)
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::load_from_path(path)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides through a lookup function
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(site) = lookup(ENV_SITE).filter(|s| !s.trim().is_empty()) {
            debug!("{} overrides site: {}", ENV_SITE, site);
            self.site = site;
        }
        if let Some(locations) = lookup(ENV_LOCATIONS).filter(|s| !s.trim().is_empty()) {
            debug!("{} overrides locations: {}", ENV_LOCATIONS, locations);
            self.locations = Some(PathBuf::from(locations));
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.site.trim().is_empty() {
            return Err(Error::configuration("Site identifier must not be empty"));
        }

        if self.workers == 0 {
            return Err(Error::configuration("Worker count must be at least 1"));
        }

        if let Some(locations) = &self.locations {
            if !locations.exists() {
                return Err(Error::configuration(format!(
                    "Locations file does not exist: {}",
                    locations.display()
                )));
            }
        }

        Ok(())
    }

    /// Set the site identifier
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    /// Set the locations table
    pub fn with_locations(mut self, locations: impl Into<PathBuf>) -> Self {
        self.locations = Some(locations.into());
        self
    }

    /// Set the worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the default log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}
