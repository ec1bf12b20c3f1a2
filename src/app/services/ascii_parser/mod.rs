//! ASCII parser for buoy time series exports
//!
//! This module turns loosely structured buoy exports (CEFAS SmartBuoy CSVs,
//! Western Channel Observatory text files) into aligned columns and a
//! reconstructed time axis. Everything here operates on already-read lines;
//! file handling lives in [`crate::app::services::buoy_loader`].
//!
//! ## Architecture
//!
//! - [`tokenizer`] - Delimiter sniffing and line splitting
//! - [`header`] - Header block detection and the name-to-index map
//! - [`column_extractor`] - Ragged-row filtering and typed column extraction
//! - [`time_reconstructor`] - Time convention detection and timestamp parsing
//!
//! ## Usage
//!
//! ```rust
//! use buoy_processor::app::models::TokenizeOptions;
//! use buoy_processor::app::services::ascii_parser::{locate_header, split_line};
//! use buoy_processor::constants::TIME_COLUMN_NAMES;
//!
//! let options = TokenizeOptions { remove_empty: false, remove_trailing: true };
//! let lines: Vec<_> = ["Year,Serial,Time,Temp", "2020,100,12.30,15.2"]
//!     .iter()
//!     .map(|line| split_line(line, options))
//!     .collect();
//!
//! let header = locate_header(&lines, TIME_COLUMN_NAMES);
//! assert_eq!(header.length, 1);
//! assert_eq!(header.index_of("Temp"), Some(3));
//! ```

pub mod column_extractor;
pub mod header;
pub mod time_reconstructor;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main functions for easy access
pub use column_extractor::{data_columns, extract_numeric, extract_raw, is_time_column};
pub use header::locate_header;
pub use time_reconstructor::reconstruct_time;
pub use tokenizer::{fill_missing, sniff_delimiter, split_line};
