//! Stations command implementation for the buoy processor CLI
//!
//! Lists every record of the `Stations` relation in the buoy database.

use super::shared::{CommandStats, setup_logging};
use crate::app::models::{QueryOutcome, StationRecord};
use crate::app::services::buoy_database::get_buoy_metadata;
use crate::cli::args::{OutputFormat, StationsArgs};
use crate::constants::DEFAULT_LOG_LEVEL;
use crate::{Error, Result};
use colored::Colorize;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Stations command runner
pub async fn run_stations(args: StationsArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    setup_logging(&args.logging, DEFAULT_LOG_LEVEL)?;
    debug!("Stations arguments: {:?}", args);
    args.validate()?;

    info!("Reading station metadata from {}", args.db.display());
    let db = args.db.clone();
    let outcome = tokio::task::spawn_blocking(move || get_buoy_metadata(&db))
        .await
        .map_err(|e| Error::processing_interrupted(format!("Metadata query task failed: {}", e)))??;

    let records = match outcome {
        QueryOutcome::Rows(records) => records,
        QueryOutcome::Failed { message } => {
            warn!("Station metadata query failed: {}", message);
            eprintln!(
                "{} Could not read stations from {}: {}",
                "✗".red().bold(),
                args.db.display(),
                message
            );
            return Ok(CommandStats {
                processing_time: start_time.elapsed(),
                ..CommandStats::default()
            });
        }
    };

    match args.output_format {
        OutputFormat::Human => print_human_stations(&records),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&records).map_err(|e| {
                Error::data_validation(format!("Failed to serialize stations: {}", e))
            })?;
            println!("{}", json);
        }
    }

    Ok(CommandStats {
        rows_returned: records.len(),
        processing_time: start_time.elapsed(),
        ..CommandStats::default()
    })
}

fn print_human_stations(records: &[StationRecord]) {
    println!("\n{} ({} records)", "Stations".bold(), records.len());
    println!("{}", "━".repeat(48));

    let columns: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.keys().map(String::as_str))
        .collect();

    for (index, record) in records.iter().enumerate() {
        println!("{}", format!("#{}", index + 1).cyan());
        for column in &columns {
            if let Some(value) = record.get(*column) {
                println!("   • {:<16} {}", column, value);
            }
        }
    }
    println!();
}
