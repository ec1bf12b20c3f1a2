//! Command-line argument definitions for the buoy processor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::constants::ENV_LOCATIONS;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the buoy time series processor
///
/// Loads ASCII buoy exports (CEFAS .csv, WCO .txt) and queries the buoy
/// metadata database.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "buoy-processor",
    version,
    about = "Load and inspect ocean buoy ASCII time series",
    long_about = "Loads loosely structured ASCII time series from ocean buoy networks, \
                  detecting delimiters, multi-row headers and time conventions, and \
                  queries station metadata and observations from a SQLite buoy database."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Load buoy files and summarize their variables and time axes
    Inspect(InspectArgs),
    /// List station metadata from the buoy database
    Stations(StationsArgs),
    /// Extract observation fields for one site table
    Observations(ObservationsArgs),
}

/// Verbosity flags shared by every subcommand
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct LoggingArgs {
    /// Increase logging verbosity
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl LoggingArgs {
    /// Get log level from verbosity flags, or `None` to use the configured default
    pub fn get_log_level(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else {
            match self.verbose {
                0 => None,
                1 => Some("info"),
                2 => Some("debug"),
                _ => Some("trace"),
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Output format options for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Buoy files or directories (searched recursively for .csv and .txt)
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Site identifier used for position lookup
    #[arg(short = 's', long = "site", value_name = "SITE")]
    pub site: Option<String>,

    /// Locations table (site, lon, lat)
    #[arg(
        short = 'l',
        long = "locations",
        value_name = "FILE",
        help = "Locations table with site, lon, lat columns",
        long_help = "Delimited table of site positions (site, lon, lat).\n\
                     Can also be set with the BUOY_LOCATIONS environment variable.\n\
                     Without it every site resolves to the reference position (0, 0)."
    )]
    pub locations: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Number of files loaded concurrently
    #[arg(short = 'w', long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Output format for results
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Arguments for the stations command
#[derive(Debug, Clone, Parser)]
pub struct StationsArgs {
    /// Path to the buoy SQLite database
    #[arg(short = 'd', long = "db", value_name = "FILE")]
    pub db: PathBuf,

    /// Output format for results
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Arguments for the observations command
#[derive(Debug, Clone, Parser)]
pub struct ObservationsArgs {
    /// Path to the buoy SQLite database
    #[arg(short = 'd', long = "db", value_name = "FILE")]
    pub db: PathBuf,

    /// Site table to read (e.g. hastings_wavenet_site)
    #[arg(short = 't', long = "table", value_name = "TABLE")]
    pub table: String,

    /// Comma-separated field names (e.g. Depth,Temperature)
    #[arg(short = 'f', long = "fields", value_name = "LIST", value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Output format for results
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

impl InspectArgs {
    /// Validate the inspect command arguments
    pub fn validate(&self) -> Result<()> {
        for path in &self.paths {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "Input path does not exist: {}",
                    path.display()
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(locations) = &self.locations {
            if !locations.exists() {
                return Err(Error::configuration(format!(
                    "Locations file does not exist: {} (see also {})",
                    locations.display(),
                    ENV_LOCATIONS
                )));
            }
        }

        if self.workers == Some(0) {
            return Err(Error::configuration("Worker count must be at least 1"));
        }

        Ok(())
    }
}

impl StationsArgs {
    /// Validate the stations command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.db.exists() {
            return Err(Error::configuration(format!(
                "Database does not exist: {}",
                self.db.display()
            )));
        }
        Ok(())
    }
}

impl ObservationsArgs {
    /// Validate the observations command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.db.exists() {
            return Err(Error::configuration(format!(
                "Database does not exist: {}",
                self.db.display()
            )));
        }
        if self.table.trim().is_empty() {
            return Err(Error::configuration("Table name must not be empty"));
        }
        Ok(())
    }

    /// Requested fields with blanks removed
    pub fn field_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inspect() {
        let args = Args::try_parse_from([
            "buoy-processor",
            "inspect",
            "a.csv",
            "b.txt",
            "--site",
            "E1",
            "-w",
            "2",
            "-vv",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Inspect(inspect)) => {
                assert_eq!(inspect.paths.len(), 2);
                assert_eq!(inspect.site.as_deref(), Some("E1"));
                assert_eq!(inspect.workers, Some(2));
                assert_eq!(inspect.logging.get_log_level(), Some("debug"));
                assert_eq!(inspect.output_format, OutputFormat::Human);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_observations_fields() {
        let args = Args::try_parse_from([
            "buoy-processor",
            "observations",
            "--db",
            "buoys.db",
            "--table",
            "l4",
            "--fields",
            "Depth,Temperature, ",
            "--output-format",
            "json",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Observations(obs)) => {
                assert_eq!(obs.field_names(), vec!["Depth", "Temperature"]);
                assert_eq!(obs.output_format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["buoy-processor", "inspect", "a.csv", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_log_levels() {
        let quiet = LoggingArgs {
            verbose: 0,
            quiet: true,
        };
        assert_eq!(quiet.get_log_level(), Some("error"));
        assert!(!quiet.show_progress());
        assert_eq!(LoggingArgs::default().get_log_level(), None);
    }

    #[test]
    fn test_inspect_requires_paths() {
        assert!(Args::try_parse_from(["buoy-processor", "inspect"]).is_err());
    }

    #[test]
    fn test_validate_missing_input() {
        let args =
            Args::try_parse_from(["buoy-processor", "inspect", "/nonexistent/a.csv"]).unwrap();
        match args.command {
            Some(Commands::Inspect(inspect)) => assert!(inspect.validate().is_err()),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
