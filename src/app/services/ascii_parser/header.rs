//! Header block detection
//!
//! A buoy export starts with one or more header lines, each containing at
//! least one known time column name (a units row followed by a names row is
//! common). The bottom-most header line is authoritative for column names.

use crate::app::models::{HeaderRegion, RawLine};
use std::collections::HashMap;
use tracing::debug;

/// Locate the header block and build the column index map
///
/// Walks lines from the top while each line contains one of `time_names`.
/// The returned `length` is the number of header lines, or 1 when no line
/// matches, in which case the first line is taken as the header as-is.
///
/// For a name repeated within the header row, only its first index is kept.
pub fn locate_header(lines: &[RawLine], time_names: &[&str]) -> HeaderRegion {
    let matching = lines
        .iter()
        .take_while(|line| line.iter().any(|token| time_names.contains(&token.as_str())))
        .count();

    let length = matching.max(1);
    let columns = lines.get(length - 1).cloned().unwrap_or_default();

    let mut indices = HashMap::with_capacity(columns.len());
    for (index, name) in columns.iter().enumerate() {
        indices.entry(name.clone()).or_insert(index);
    }

    if matching == 0 {
        debug!("No header line contains a recognized time column; using first line");
    }
    debug!(
        "Header: {} line(s), {} columns ({} unique)",
        length,
        columns.len(),
        indices.len()
    );

    HeaderRegion {
        columns,
        length,
        indices,
    }
}
