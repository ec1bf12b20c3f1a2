//! Line tokenization with delimiter sniffing
//!
//! Buoy exports mix semicolons, commas, tabs and runs of spaces. Each line is
//! split on the first delimiter candidate it contains, with per-profile
//! handling of empty and trailing fields.

use crate::app::models::{RawLine, TokenizeOptions};
use crate::constants::{DELIMITERS, MISSING_VALUE_MARKER};

/// Find the first delimiter candidate present anywhere in the line
pub fn sniff_delimiter(line: &str) -> Option<char> {
    DELIMITERS.iter().copied().find(|d| line.contains(*d))
}

/// Split one line into tokens
///
/// Without a delimiter the line is split on whitespace, which yields a single
/// token for any non-blank line. If both options are set, `remove_empty` is
/// applied to the trailing-trimmed line; no profile requests both.
pub fn split_line(line: &str, options: TokenizeOptions) -> RawLine {
    let delimiter = sniff_delimiter(line);
    let mut line = line.trim_end_matches('\n').trim_end_matches('\r');

    if options.remove_trailing {
        line = match delimiter {
            Some(d) => line.trim_end_matches(d),
            None => line.trim_end(),
        };
    }

    let tokens: Vec<&str> = match delimiter {
        Some(d) => line.split(d).collect(),
        None => line.split_whitespace().collect(),
    };

    if options.remove_empty {
        tokens
            .into_iter()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        tokens.into_iter().map(str::to_string).collect()
    }
}

/// Replace empty tokens with the missing value marker
pub fn fill_missing(line: RawLine) -> RawLine {
    line.into_iter()
        .map(|token| {
            if token.is_empty() {
                MISSING_VALUE_MARKER.to_string()
            } else {
                token
            }
        })
        .collect()
}
