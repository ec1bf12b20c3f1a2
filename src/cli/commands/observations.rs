//! Observations command implementation for the buoy processor CLI
//!
//! Pulls the requested fields of one site table as a float matrix.

use super::shared::{CommandStats, setup_logging};
use crate::app::models::{ObservationMatrix, QueryOutcome};
use crate::app::services::buoy_database::get_buoy_data;
use crate::cli::args::{ObservationsArgs, OutputFormat};
use crate::constants::DEFAULT_LOG_LEVEL;
use crate::{Error, Result};
use colored::Colorize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Observations command runner
pub async fn run_observations(args: ObservationsArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    setup_logging(&args.logging, DEFAULT_LOG_LEVEL)?;
    debug!("Observations arguments: {:?}", args);
    args.validate()?;

    let fields: Vec<String> = args.field_names().into_iter().map(str::to_string).collect();
    info!(
        "Reading {} field(s) from table {} in {}",
        fields.len(),
        args.table,
        args.db.display()
    );

    let db = args.db.clone();
    let table = args.table.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
        get_buoy_data(&db, &table, &fields)
    })
    .await
    .map_err(|e| Error::processing_interrupted(format!("Observation query task failed: {}", e)))??;

    let matrix = match outcome {
        QueryOutcome::Rows(matrix) => matrix,
        QueryOutcome::Failed { message } => {
            warn!("Observation query failed: {}", message);
            eprintln!(
                "{} Could not read {} from {}: {}",
                "✗".red().bold(),
                args.table,
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
        OutputFormat::Human => print_human_matrix(&args.table, &matrix),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&matrix).map_err(|e| {
                Error::data_validation(format!("Failed to serialize observations: {}", e))
            })?;
            println!("{}", json);
        }
    }

    Ok(CommandStats {
        rows_returned: matrix.rows,
        processing_time: start_time.elapsed(),
        ..CommandStats::default()
    })
}

fn print_human_matrix(table: &str, matrix: &ObservationMatrix) {
    println!(
        "\n{} ({} rows x {} fields)",
        table.bold(),
        matrix.rows,
        matrix.columns
    );
    if matrix.columns == 0 {
        println!("{}", "No fields requested".yellow());
        return;
    }

    let header: Vec<String> = matrix.fields.iter().map(|f| format!("{:>14}", f)).collect();
    println!("{}", header.join(" ").cyan());

    for row in 0..matrix.rows {
        if let Some(values) = matrix.row(row) {
            let cells: Vec<String> = values
                .iter()
                .map(|value| {
                    if value.is_nan() {
                        format!("{:>14}", "NaN")
                    } else {
                        format!("{:>14.4}", value)
                    }
                })
                .collect();
            println!("{}", cells.join(" "));
        }
    }
    println!();
}
