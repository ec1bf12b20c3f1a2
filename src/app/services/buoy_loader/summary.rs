//! Serializable overview of a loaded buoy file

use super::buoy::Buoy;
use crate::app::models::{FileProfile, Position, TimeConvention};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::PathBuf;

/// Overview of a buoy file for reporting
#[derive(Debug, Clone, Serialize)]
pub struct BuoySummary {
    pub path: PathBuf,
    pub profile: FileProfile,
    pub site: String,
    pub header_length: usize,
    pub columns: Vec<String>,
    pub duplicate_columns: Vec<String>,
    pub body_lines: usize,
    pub rows_kept: usize,
    pub convention: Option<TimeConvention>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub variables: Vec<VariableSummary>,
    pub position: Option<Position>,
    pub loaded: bool,
}

/// Per-variable sample and missing counts
#[derive(Debug, Clone, Serialize)]
pub struct VariableSummary {
    pub name: String,
    pub samples: usize,
    pub missing: usize,
}

impl BuoySummary {
    pub fn from_buoy(buoy: &Buoy) -> Self {
        let time = buoy.time.as_ref();
        let span = time.and_then(|t| t.span());

        let variables = buoy
            .data
            .iter()
            .flat_map(|data| data.values())
            .map(|series| VariableSummary {
                name: series.name.clone(),
                samples: series.len(),
                missing: series.missing_count(),
            })
            .collect();

        Self {
            path: buoy.path().to_path_buf(),
            profile: buoy.profile(),
            site: buoy.site().to_string(),
            header_length: buoy.header.length,
            columns: buoy.header.columns.clone(),
            duplicate_columns: buoy
                .header
                .duplicate_columns()
                .into_iter()
                .map(str::to_string)
                .collect(),
            body_lines: buoy.body_line_count(),
            rows_kept: time.map(|t| t.len()).unwrap_or(0),
            convention: time.and_then(|t| t.convention),
            start: span.map(|(start, _)| start),
            end: span.map(|(_, end)| end),
            variables,
            position: buoy.position,
            loaded: buoy.is_loaded(),
        }
    }

    /// Rows dropped for not matching the header width
    pub fn rows_dropped(&self) -> usize {
        if self.loaded {
            self.body_lines.saturating_sub(self.rows_kept)
        } else {
            0
        }
    }
}
