//! Tests for header block detection

use super::super::header::locate_header;
use super::{cefas_lines, tokenize, wco_lines};
use crate::app::models::FileProfile;
use crate::constants::TIME_COLUMN_NAMES;

#[test]
fn test_single_header_line() {
    let lines = tokenize(
        &["Year,Serial,Time,Temp", "2020,100,12.30,15.2"],
        FileProfile::Csv,
    );

    let header = locate_header(&lines, TIME_COLUMN_NAMES);

    assert_eq!(header.length, 1);
    assert_eq!(header.columns, vec!["Year", "Serial", "Time", "Temp"]);
    assert_eq!(header.index_of("Year"), Some(0));
    assert_eq!(header.index_of("Temp"), Some(3));
}

#[test]
fn test_multi_row_header_uses_last_row() {
    let lines = tokenize(
        &[
            "Year Serial Time degC PSU",
            "Year Serial Time Temp Sal",
            "2020 100 12.30 15.2 35.1",
        ],
        FileProfile::Txt,
    );

    let header = locate_header(&lines, TIME_COLUMN_NAMES);

    assert_eq!(header.length, 2);
    assert_eq!(header.columns[3], "Temp");
    assert!(!header.has_column("degC"));
}

#[test]
fn test_wco_fixture_header() {
    let lines = tokenize(&wco_lines(), FileProfile::Txt);
    let header = locate_header(&lines, TIME_COLUMN_NAMES);

    assert_eq!(header.length, 2);
    assert_eq!(header.column_count(), 5);
}

#[test]
fn test_no_matching_line_falls_back_to_first() {
    let lines = tokenize(&cefas_lines(), FileProfile::Csv);
    let header = locate_header(&lines, TIME_COLUMN_NAMES);

    assert_eq!(header.length, 1);
    assert_eq!(header.columns[0], "Time (GMT)");
}

#[test]
fn test_empty_input() {
    let header = locate_header(&[], TIME_COLUMN_NAMES);

    assert_eq!(header.length, 1);
    assert!(header.columns.is_empty());
    assert!(header.indices.is_empty());
}

#[test]
fn test_duplicate_names_resolve_to_first_index() {
    let lines = tokenize(&["Time,Temp,Sal,Temp"], FileProfile::Csv);
    let header = locate_header(&lines, TIME_COLUMN_NAMES);

    assert_eq!(header.column_count(), 4);
    assert_eq!(header.indices.len(), 3);
    assert_eq!(header.index_of("Temp"), Some(1));
    assert_eq!(header.duplicate_columns(), vec!["Temp"]);
}

#[test]
fn test_header_detection_is_idempotent() {
    let lines = tokenize(&wco_lines(), FileProfile::Txt);

    let first = locate_header(&lines, TIME_COLUMN_NAMES);
    let second = locate_header(&lines, TIME_COLUMN_NAMES);

    assert_eq!(first, second);
}

#[test]
fn test_header_block_stops_at_first_body_line() {
    let lines = tokenize(
        &["Time,Value", "1.0,2.0", "Time,Value", "3.0,4.0"],
        FileProfile::Csv,
    );

    let header = locate_header(&lines, TIME_COLUMN_NAMES);
    assert_eq!(header.length, 1);
}
