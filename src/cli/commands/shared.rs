//! Shared components for CLI commands
//!
//! Logging setup, configuration loading, input discovery and progress
//! reporting used across the command implementations.

use crate::cli::args::{InspectArgs, LoggingArgs};
use crate::config::BuoyConfig;
use crate::constants::{CSV_EXTENSION, DEFAULT_LOG_LEVEL, PROGRESS_TEMPLATE, TXT_EXTENSION};
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};
use walkdir::WalkDir;

/// Run statistics reported by every command
#[derive(Debug, Clone, Default)]
pub struct CommandStats {
    /// Files opened
    pub files_processed: usize,
    /// Files with a usable time axis
    pub files_loaded: usize,
    /// Files that failed to load
    pub files_failed: usize,
    /// Rows returned by database queries
    pub rows_returned: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

/// Handle for swapping the log filter after startup
pub type LogFilterHandle = reload::Handle<EnvFilter, Registry>;

/// Set up structured logging
///
/// `RUST_LOG` takes precedence; otherwise the verbosity flags, then
/// `default_level`. The returned handle lets a level read later from the
/// config file replace the default.
pub fn setup_logging(logging: &LoggingArgs, default_level: &str) -> Result<LogFilterHandle> {
    let log_level = logging.get_log_level().unwrap_or(default_level);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("buoy_processor={}", log_level)));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(handle)
}

/// Level from the config file that should replace the startup default
///
/// Verbosity flags and `RUST_LOG` both outrank the config file.
pub fn configured_log_level(
    logging: &LoggingArgs,
    env_filter_set: bool,
    config_level: &str,
) -> Option<String> {
    if env_filter_set || logging.get_log_level().is_some() || config_level == DEFAULT_LOG_LEVEL {
        None
    } else {
        Some(config_level.to_string())
    }
}

/// Apply the config file's log level once configuration has been loaded
pub fn apply_configured_log_level(
    handle: &LogFilterHandle,
    logging: &LoggingArgs,
    config_level: &str,
) -> Result<()> {
    let env_filter_set = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    if let Some(level) = configured_log_level(logging, env_filter_set, config_level) {
        handle
            .reload(EnvFilter::new(format!("buoy_processor={}", level)))
            .map_err(|e| Error::configuration(format!("Failed to apply log level: {}", e)))?;
        debug!("Log level set from configuration: {}", level);
    }
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &InspectArgs) -> Result<BuoyConfig> {
    let default_path = BuoyConfig::default_config_path();
    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None if default_path.exists() => Some(default_path.as_path()),
        None => None,
    };

    if let Some(path) = config_file {
        info!("Using config file: {}", path.display());
    } else {
        info!("No config file found, using defaults and environment variables");
    }

    let mut config = BuoyConfig::load_layered(config_file)?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut BuoyConfig, args: &InspectArgs) {
    if let Some(site) = &args.site {
        config.site = site.clone();
    }
    if let Some(locations) = &args.locations {
        config.locations = Some(locations.clone());
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
}

/// Expand input paths into buoy files, walking directories recursively
pub fn discover_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }

        for entry in WalkDir::new(path).follow_links(true) {
            let entry = entry.map_err(|e| {
                Error::directory_traversal(format!("Failed to walk {}", path.display()), e)
            })?;
            if entry.file_type().is_file() && is_buoy_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    debug!("Discovered {} buoy files", files.len());
    Ok(files)
}

/// Whether a path has one of the recognized export extensions
pub fn is_buoy_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some(CSV_EXTENSION) | Some(TXT_EXTENSION)
    )
}

/// Create a progress bar with the standard style
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
