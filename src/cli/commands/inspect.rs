//! Inspect command implementation for the buoy processor CLI
//!
//! Loads each discovered buoy file on the blocking pool, bounded by the
//! configured worker count, and reports what was recovered from it.

use super::shared::{
    CommandStats, apply_configured_log_level, create_progress_bar, discover_input_files,
    load_configuration, setup_logging,
};
use crate::app::services::buoy_loader::{Buoy, BuoySummary};
use crate::app::services::position_resolver::{PositionResolver, resolver_for};
use crate::cli::args::{InspectArgs, OutputFormat};
use crate::config::BuoyConfig;
use crate::constants::DEFAULT_LOG_LEVEL;
use crate::{Error, Result};
use colored::Colorize;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Outcome of loading one file
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InspectReport {
    Loaded(BuoySummary),
    Failed { path: PathBuf, error: String },
}

/// Inspect command runner
pub async fn run_inspect(args: InspectArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    let log_handle = setup_logging(&args.logging, DEFAULT_LOG_LEVEL)?;

    info!("Starting buoy inspection");
    debug!("Inspect arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(&args)?;
    apply_configured_log_level(&log_handle, &args.logging, &config.log_level)?;
    debug!("Configuration: {:?}", config);

    let files = discover_input_files(&args.paths)?;
    if files.is_empty() {
        warn!("No .csv or .txt buoy files found in the given paths");
    }

    let show_progress = args.logging.show_progress() && args.output_format == OutputFormat::Human;
    let reports = inspect_files(files, config, show_progress).await?;

    let mut stats = CommandStats {
        files_processed: reports.len(),
        ..CommandStats::default()
    };
    for report in &reports {
        match report {
            InspectReport::Loaded(summary) if summary.loaded => stats.files_loaded += 1,
            InspectReport::Loaded(_) => {}
            InspectReport::Failed { .. } => stats.files_failed += 1,
        }
    }
    stats.processing_time = start_time.elapsed();

    match args.output_format {
        OutputFormat::Human => print_human_reports(&reports, &stats),
        OutputFormat::Json => print_json_reports(&reports)?,
    }

    info!(
        "Inspected {} files ({} loaded, {} failed) in {:.2?}",
        stats.files_processed, stats.files_loaded, stats.files_failed, stats.processing_time
    );

    Ok(stats)
}

/// Load files concurrently, preserving input order in the returned reports
pub async fn inspect_files(
    files: Vec<PathBuf>,
    config: BuoyConfig,
    show_progress: bool,
) -> Result<Vec<InspectReport>> {
    let workers = config.workers.max(1);
    let resolver: Arc<dyn PositionResolver> = Arc::from(resolver_for(&config));
    let config = Arc::new(config);

    let progress = show_progress.then(|| create_progress_bar(files.len() as u64, "Loading"));

    let tasks = files.into_iter().enumerate().map(|(index, path)| {
        let config = Arc::clone(&config);
        let resolver = Arc::clone(&resolver);
        async move {
            let task_path = path.clone();
            let loaded = tokio::task::spawn_blocking(move || {
                Buoy::from_path(&task_path, &config, resolver.as_ref())
            })
            .await
            .map_err(|e| {
                Error::processing_interrupted(format!(
                    "Loader task for {} failed: {}",
                    path.display(),
                    e
                ))
            })?;
            Ok::<_, Error>((index, path, loaded))
        }
    });

    let mut results = Vec::new();
    let mut completed = stream::iter(tasks).buffer_unordered(workers);
    while let Some(result) = completed.next().await {
        let (index, path, loaded) = result?;
        if let Some(pb) = &progress {
            pb.inc(1);
        }

        let report = match loaded {
            Ok(buoy) => InspectReport::Loaded(buoy.summary()),
            Err(e) => {
                error!("Failed to load {}: {}", path.display(), e);
                InspectReport::Failed {
                    path,
                    error: e.to_string(),
                }
            }
        };
        results.push((index, report));
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    results.sort_by_key(|(index, _)| *index);
    Ok(results.into_iter().map(|(_, report)| report).collect())
}

fn print_human_reports(reports: &[InspectReport], stats: &CommandStats) {
    for report in reports {
        match report {
            InspectReport::Loaded(summary) => print_summary(summary),
            InspectReport::Failed { path, error } => {
                println!("{} {}", "✗".red().bold(), path.display().to_string().bold());
                println!("   {}", error.red());
                println!();
            }
        }
    }

    println!("{}", "━".repeat(48));
    println!(
        "Files: {}  Loaded: {}  Failed: {}  Time: {:.2?}",
        stats.files_processed,
        stats.files_loaded.to_string().green(),
        if stats.files_failed > 0 {
            stats.files_failed.to_string().red()
        } else {
            stats.files_failed.to_string().normal()
        },
        stats.processing_time
    );
}

fn print_summary(summary: &BuoySummary) {
    let marker = if summary.loaded {
        "✓".green().bold()
    } else {
        "!".yellow().bold()
    };
    println!("{} {}", marker, summary.path.display().to_string().bold());
    println!(
        "   • Profile: {:?}  Site: {}  Header rows: {}",
        summary.profile, summary.site, summary.header_length
    );
    println!("   • Columns: {}", summary.columns.join(", "));
    if !summary.duplicate_columns.is_empty() {
        println!(
            "   • Duplicate columns (first wins): {}",
            summary.duplicate_columns.join(", ").yellow()
        );
    }

    match summary.convention {
        Some(convention) => {
            println!("   • Time convention: {}", convention);
            if let (Some(start), Some(end)) = (summary.start, summary.end) {
                println!("   • Span: {} to {}", start, end);
            }
        }
        None => println!("   • {}", "No recognized time convention".yellow()),
    }

    println!(
        "   • Rows: {} kept of {} ({} dropped)",
        summary.rows_kept,
        summary.body_lines,
        summary.rows_dropped()
    );

    if let Some(position) = summary.position {
        println!("   • Position: lon {:.4}, lat {:.4}", position.lon, position.lat);
    }

    for variable in &summary.variables {
        let missing = if variable.missing > 0 {
            format!("{} missing", variable.missing).yellow()
        } else {
            "complete".normal()
        };
        println!(
            "     - {:<24} {:>8} samples  {}",
            variable.name, variable.samples, missing
        );
    }
    println!();
}

fn print_json_reports(reports: &[InspectReport]) -> Result<()> {
    let json = serde_json::to_string_pretty(reports)
        .map_err(|e| Error::data_validation(format!("Failed to serialize report: {}", e)))?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_inspect_files_keeps_order_and_failures() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("a.csv");
        let bad = dir.path().join("b.csv");
        let missing = dir.path().join("c.csv");
        fs::write(
            &good,
            "Time (GMT),Temp,Sal\n2020-01-01 00:00:00,10.5,35.0\n2020-01-01 01:00:00,,35.1\n",
        )
        .unwrap();
        fs::write(
            &bad,
            "Time (GMT),Temp\n2020-01-01 00:00:00,warm\n2020-01-01 01:00:00,11\n",
        )
        .unwrap();

        let config = BuoyConfig::default().with_workers(2);
        let reports = inspect_files(vec![good.clone(), bad.clone(), missing], config, false)
            .await
            .unwrap();

        assert_eq!(reports.len(), 3);
        match &reports[0] {
            InspectReport::Loaded(summary) => {
                assert_eq!(summary.path, good);
                assert!(summary.loaded);
                assert_eq!(summary.rows_kept, 2);
            }
            other => panic!("unexpected report: {:?}", other),
        }
        assert!(matches!(&reports[1], InspectReport::Failed { path, .. } if *path == bad));
        assert!(matches!(&reports[2], InspectReport::Failed { .. }));
    }

    #[test]
    fn test_report_serializes_with_status_tag() {
        let report = InspectReport::Failed {
            path: PathBuf::from("x.txt"),
            error: "boom".to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "boom");
    }
}
