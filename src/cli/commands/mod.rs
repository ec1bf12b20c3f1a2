//! Command implementations for the buoy processor CLI
//!
//! Each command is implemented in its own module:
//! - `inspect`: Load buoy files and report header, time axis and variables
//! - `stations`: Station metadata from the buoy database
//! - `observations`: Observation fields for one site table

pub mod inspect;
pub mod observations;
pub mod shared;
pub mod stations;

pub use shared::CommandStats;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Dispatch to the subcommand handler
pub async fn run(args: Args) -> Result<CommandStats> {
    match args.command {
        Some(Commands::Inspect(inspect_args)) => inspect::run_inspect(inspect_args).await,
        Some(Commands::Stations(stations_args)) => stations::run_stations(stations_args).await,
        Some(Commands::Observations(observations_args)) => {
            observations::run_observations(observations_args).await
        }
        None => Ok(CommandStats::default()),
    }
}
