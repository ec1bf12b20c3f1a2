//! Test utilities for ASCII parser testing
//!
//! Helpers to tokenize inline fixtures the same way the loader does.

use crate::app::models::{FileProfile, RawLine};
use crate::app::services::ascii_parser::{fill_missing, split_line};

mod header_tests;
mod tokenizer_tests;

/// Tokenize fixture lines with a profile, filling missing markers as the loader does
pub fn tokenize(lines: &[&str], profile: FileProfile) -> Vec<RawLine> {
    lines
        .iter()
        .map(|line| split_line(line, profile.options()))
        .map(|tokens| {
            if profile.preserves_empty_fields() {
                fill_missing(tokens)
            } else {
                tokens
            }
        })
        .collect()
}

/// WCO-style fixture with a units row above the names row
pub fn wco_lines() -> Vec<&'static str> {
    vec![
        "Year Serial Time Temp Sal",
        "Year Serial Time Temp   Sal",
        "2020  100   12.30  15.2  35.1",
        "2020  101   13.00  15.4  35.0",
        "2020  102   06.5   15.1  34.9",
    ]
}

/// CEFAS-style fixture with embedded and trailing empties
pub fn cefas_lines() -> Vec<&'static str> {
    vec![
        "Time (GMT),Temperature,Salinity,Turbidity",
        "2019-06-01 00:00:00,12.1,34.5,,",
        "2019-06-01 00:30:00,12.3,,0.8,",
        "2019-06-01 01:00:00,12.2,34.6,0.9",
    ]
}
