//! Data models for buoy processing
//!
//! This module contains the core data structures produced by the ASCII
//! ingestion pipeline (header regions, time axes, per-variable series) and the
//! records returned by the buoy database collaborators.

use crate::constants::{CEFAS_TIME_COLUMN, CSV_EXTENSION, TXT_EXTENSION};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

/// One tokenized line of an input file
pub type RawLine = Vec<String>;

// =============================================================================
// Tokenizer Profiles
// =============================================================================

/// Tokenizer switches applied to every line of a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizeOptions {
    /// Drop zero-length tokens after trimming (collapses repeated separators)
    pub remove_empty: bool,

    /// Strip trailing delimiter runs before splitting
    pub remove_trailing: bool,
}

/// Input format profile, selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileProfile {
    /// CEFAS comma-separated exports: embedded empties kept, trailing ones trimmed
    Csv,
    /// WCO space-separated exports: repeated separators collapsed
    Txt,
    /// Anything else: lines are split as-is
    Plain,
}

impl FileProfile {
    /// Detect the profile from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(CSV_EXTENSION) => FileProfile::Csv,
            Some(TXT_EXTENSION) => FileProfile::Txt,
            _ => FileProfile::Plain,
        }
    }

    /// Tokenizer options for this profile; never sets both switches
    pub fn options(&self) -> TokenizeOptions {
        match self {
            FileProfile::Csv => TokenizeOptions {
                remove_empty: false,
                remove_trailing: true,
            },
            FileProfile::Txt => TokenizeOptions {
                remove_empty: true,
                remove_trailing: false,
            },
            FileProfile::Plain => TokenizeOptions::default(),
        }
    }

    /// Whether empty fields survive tokenization and need a missing marker
    pub fn preserves_empty_fields(&self) -> bool {
        !self.options().remove_empty
    }
}

// =============================================================================
// Header Region
// =============================================================================

/// The detected header block of a file
///
/// `columns` is the bottom-most header row. `indices` maps each name to its
/// first position within that row, so a duplicated name always resolves to
/// its leftmost column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRegion {
    /// Column names from the last header line
    pub columns: Vec<String>,

    /// Number of leading lines consumed by the header (at least 1)
    pub length: usize,

    /// Column name to zero-based index
    pub indices: HashMap<String, usize>,
}

impl HeaderRegion {
    /// Number of columns a body row must have to be kept
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the index for a given column name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Check if a column exists in the header
    pub fn has_column(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Names that occur more than once in the header row
    pub fn duplicate_columns(&self) -> Vec<&str> {
        let mut seen = HashMap::new();
        for name in &self.columns {
            *seen.entry(name.as_str()).or_insert(0usize) += 1;
        }
        let mut duplicates: Vec<&str> = seen
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect();
        duplicates.sort_unstable();
        duplicates
    }
}

// =============================================================================
// Time Series
// =============================================================================

/// A single variable's values, aligned with the time axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Count of NaN values (missing markers and explicit NaNs)
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }
}

/// Source-specific time encoding detected in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeConvention {
    /// Western Channel Observatory: `Year`, day-of-year `Serial`, decimal-hour `Time`
    DayOfYear,
    /// CEFAS: single `Time (GMT)` column formatted `YYYY-MM-DD HH:MM:SS`
    CefasTimestamp,
}

impl fmt::Display for TimeConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeConvention::DayOfYear => write!(f, "Year/Serial/Time (day-of-year)"),
            TimeConvention::CefasTimestamp => write!(f, "{}", CEFAS_TIME_COLUMN),
        }
    }
}

/// Raw time columns plus the reconstructed timestamp sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    /// Extracted time-related columns as unparsed strings
    pub raw_columns: BTreeMap<String, Vec<String>>,

    /// Absolute timestamps, one per retained body row (empty if unrecognized)
    pub datetime: Vec<NaiveDateTime>,

    /// Convention used to build `datetime`
    pub convention: Option<TimeConvention>,
}

impl TimeAxis {
    pub fn len(&self) -> usize {
        self.datetime.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datetime.is_empty()
    }

    /// Raw values of one extracted time column
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.raw_columns.get(name).map(|values| values.as_slice())
    }

    /// First and last timestamps, if any
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match (self.datetime.first(), self.datetime.last()) {
            (Some(first), Some(last)) => Some((*first, *last)),
            _ => None,
        }
    }
}

/// Site coordinate in decimal degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lon: f64,
    pub lat: f64,
}

impl Position {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

// =============================================================================
// Database Records
// =============================================================================

/// A single cell of a station metadata record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Null => write!(f, "NULL"),
            MetadataValue::Integer(value) => write!(f, "{}", value),
            MetadataValue::Real(value) => write!(f, "{}", value),
            MetadataValue::Text(value) => write!(f, "{}", value),
            MetadataValue::Blob(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

/// One row of the `Stations` relation, keyed by column name
pub type StationRecord = BTreeMap<String, MetadataValue>;

/// Row-major matrix of observations (rows x requested fields)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationMatrix {
    pub fields: Vec<String>,
    pub rows: usize,
    pub columns: usize,
    pub values: Vec<f64>,
}

impl ObservationMatrix {
    /// A zero-width, zero-row matrix
    pub fn empty() -> Self {
        Self {
            fields: Vec::new(),
            rows: 0,
            columns: 0,
            values: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at (`row`, `column`)
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.values.get(row * self.columns + column).copied()
    }

    /// One row as a slice
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.columns;
        self.values.get(start..start + self.columns)
    }

    /// One field's values, top to bottom
    pub fn column(&self, field: &str) -> Option<Vec<f64>> {
        let index = self.fields.iter().position(|name| name == field)?;
        Some(
            (0..self.rows)
                .filter_map(|row| self.get(row, index))
                .collect(),
        )
    }
}

/// Outcome of a database collaborator call
///
/// Query and connectivity failures are recovered inside the collaborator and
/// surface as `Failed`; callers must check for it explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryOutcome<T> {
    Rows(T),
    Failed { message: String },
}

impl<T> QueryOutcome<T> {
    pub fn failed(message: impl Into<String>) -> Self {
        QueryOutcome::Failed {
            message: message.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, QueryOutcome::Failed { .. })
    }

    pub fn rows(&self) -> Option<&T> {
        match self {
            QueryOutcome::Rows(rows) => Some(rows),
            QueryOutcome::Failed { .. } => None,
        }
    }

    pub fn into_rows(self) -> Option<T> {
        match self {
            QueryOutcome::Rows(rows) => Some(rows),
            QueryOutcome::Failed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_profile_from_extension() {
        assert_eq!(
            FileProfile::from_path(&PathBuf::from("l4_2020.csv")),
            FileProfile::Csv
        );
        assert_eq!(
            FileProfile::from_path(&PathBuf::from("L4/2020.txt")),
            FileProfile::Txt
        );
        assert_eq!(
            FileProfile::from_path(&PathBuf::from("data.dat")),
            FileProfile::Plain
        );
        assert_eq!(
            FileProfile::from_path(&PathBuf::from("no_extension")),
            FileProfile::Plain
        );
    }

    #[test]
    fn test_profile_options_are_exclusive() {
        for profile in [FileProfile::Csv, FileProfile::Txt, FileProfile::Plain] {
            let options = profile.options();
            assert!(!(options.remove_empty && options.remove_trailing));
        }
        assert!(FileProfile::Csv.preserves_empty_fields());
        assert!(!FileProfile::Txt.preserves_empty_fields());
    }

    #[test]
    fn test_header_duplicate_columns() {
        let header = HeaderRegion {
            columns: vec!["Time".into(), "Temp".into(), "Temp".into()],
            length: 1,
            indices: HashMap::from([("Time".into(), 0), ("Temp".into(), 1)]),
        };

        assert_eq!(header.column_count(), 3);
        assert_eq!(header.index_of("Temp"), Some(1));
        assert_eq!(header.duplicate_columns(), vec!["Temp"]);
    }

    #[test]
    fn test_observation_matrix_access() {
        let matrix = ObservationMatrix {
            fields: vec!["Depth".into(), "Temperature".into()],
            rows: 2,
            columns: 2,
            values: vec![1.0, 10.5, 2.0, f64::NAN],
        };

        assert_eq!(matrix.get(0, 1), Some(10.5));
        assert_eq!(matrix.row(1).map(|r| r[0]), Some(2.0));
        assert_eq!(matrix.column("Depth"), Some(vec![1.0, 2.0]));
        assert!(matrix.get(2, 0).is_none());
        assert!(ObservationMatrix::empty().is_empty());
    }

    #[test]
    fn test_query_outcome_sentinel() {
        let failed: QueryOutcome<Vec<StationRecord>> = QueryOutcome::failed("no such table");
        assert!(failed.is_failed());
        assert!(failed.rows().is_none());

        let rows = QueryOutcome::Rows(vec![1, 2, 3]);
        assert!(!rows.is_failed());
        assert_eq!(rows.into_rows(), Some(vec![1, 2, 3]));
    }
}
