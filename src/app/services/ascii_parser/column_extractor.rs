//! Column extraction from body rows
//!
//! Body rows are every line after the header block. A row is used only when
//! its token count equals the header's column count, so every column pulled
//! from one file has the same length and row alignment.

use crate::app::models::{HeaderRegion, RawLine};
use crate::constants::{CEFAS_TIME_COLUMN, MIN_BODY_LINES, TIME_COLUMN_NAMES};
use crate::{Error, Result};

/// Whether a column belongs to the time axis rather than the data
pub fn is_time_column(name: &str) -> bool {
    name == CEFAS_TIME_COLUMN || TIME_COLUMN_NAMES.contains(&name)
}

/// Number of lines after the header block, ragged or not
pub fn body_line_count(lines: &[RawLine], header: &HeaderRegion) -> usize {
    lines.len().saturating_sub(header.length)
}

/// Whether the file has enough body lines for columns to be extracted
pub fn has_body(lines: &[RawLine], header: &HeaderRegion) -> bool {
    body_line_count(lines, header) >= MIN_BODY_LINES
}

/// Body rows whose width matches the header, with their 1-based line number
pub fn body_rows<'a>(
    lines: &'a [RawLine],
    header: &'a HeaderRegion,
) -> impl Iterator<Item = (usize, &'a RawLine)> + 'a {
    let width = header.column_count();
    lines
        .iter()
        .enumerate()
        .skip(header.length)
        .filter(move |(_, row)| row.len() == width)
        .map(|(index, row)| (index + 1, row))
}

/// Data column names in header order, each name once
pub fn data_columns(header: &HeaderRegion) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for name in &header.columns {
        if !is_time_column(name) && !names.contains(&name.as_str()) {
            names.push(name);
        }
    }
    names
}

/// Extract a column as unparsed strings
pub fn extract_raw(lines: &[RawLine], header: &HeaderRegion, name: &str) -> Result<Vec<String>> {
    let index = column_index(header, name)?;
    Ok(body_rows(lines, header)
        .map(|(_, row)| row[index].clone())
        .collect())
}

/// Extract a column as `f64`, failing on the first unparseable value
pub fn extract_numeric(lines: &[RawLine], header: &HeaderRegion, name: &str) -> Result<Vec<f64>> {
    let index = column_index(header, name)?;
    body_rows(lines, header)
        .map(|(line_number, row)| {
            let raw = &row[index];
            parse_value(raw).ok_or_else(|| {
                Error::data_validation(format!(
                    "Invalid numeric value for {} at line {}: '{}'",
                    name, line_number, raw
                ))
            })
        })
        .collect()
}

/// Parse one field as a float; accepts `NaN` and surrounding whitespace
pub fn parse_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

fn column_index(header: &HeaderRegion, name: &str) -> Result<usize> {
    header
        .index_of(name)
        .ok_or_else(|| Error::data_validation(format!("Column '{}' not found in header", name)))
}
