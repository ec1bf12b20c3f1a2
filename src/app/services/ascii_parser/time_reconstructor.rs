//! Time axis reconstruction
//!
//! Buoy sources encode time differently. Known conventions are checked in
//! priority order and the first whose columns are all present wins:
//!
//! 1. `Year` + `Serial` + `Time`: Western Channel Observatory day-of-year,
//!    with `Time` in decimal hours (`12.30` is 12:18:00)
//! 2. `Time (GMT)`: CEFAS `YYYY-MM-DD HH:MM:SS`
//!
//! When neither matches the timestamp sequence is empty; the loader treats
//! that as "no usable time axis".

use super::column_extractor::{extract_raw, has_body, is_time_column};
use crate::app::models::{HeaderRegion, RawLine, TimeAxis, TimeConvention};
use crate::constants::{
    CEFAS_DATETIME_FORMAT, CEFAS_TIME_COLUMN, SECONDS_PER_HOUR, WCO_DAY_OF_YEAR_COLUMN,
    WCO_HOUR_COLUMN, WCO_YEAR_COLUMN,
};
use crate::{Error, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;
use tracing::debug;

/// Extract the time columns and build the timestamp sequence
pub fn reconstruct_time(lines: &[RawLine], header: &HeaderRegion) -> Result<TimeAxis> {
    let mut raw_columns = BTreeMap::new();

    if has_body(lines, header) {
        for name in header.columns.iter().filter(|name| is_time_column(name)) {
            if !raw_columns.contains_key(name) {
                raw_columns.insert(name.clone(), extract_raw(lines, header, name)?);
            }
        }
    }

    let convention = detect_convention(&raw_columns);
    let datetime = match convention {
        Some(TimeConvention::DayOfYear) => {
            let years = &raw_columns[WCO_YEAR_COLUMN];
            let days = &raw_columns[WCO_DAY_OF_YEAR_COLUMN];
            let hours = &raw_columns[WCO_HOUR_COLUMN];
            years
                .iter()
                .zip(days)
                .zip(hours)
                .map(|((year, day), hour)| parse_day_of_year(year, day, hour))
                .collect::<Result<Vec<_>>>()?
        }
        Some(TimeConvention::CefasTimestamp) => raw_columns[CEFAS_TIME_COLUMN]
            .iter()
            .map(|value| parse_cefas_timestamp(value))
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    debug!(
        "Time axis: {} column(s), convention {:?}, {} timestamps",
        raw_columns.len(),
        convention,
        datetime.len()
    );

    Ok(TimeAxis {
        raw_columns,
        datetime,
        convention,
    })
}

/// Pick the first convention whose columns were all extracted
pub fn detect_convention(raw_columns: &BTreeMap<String, Vec<String>>) -> Option<TimeConvention> {
    let has = |name: &str| raw_columns.contains_key(name);

    if has(WCO_YEAR_COLUMN) && has(WCO_DAY_OF_YEAR_COLUMN) && has(WCO_HOUR_COLUMN) {
        Some(TimeConvention::DayOfYear)
    } else if has(CEFAS_TIME_COLUMN) {
        Some(TimeConvention::CefasTimestamp)
    } else {
        None
    }
}

/// Build a timestamp from a year, a 1-based day-of-year and decimal hours
///
/// The fractional part of `hours` is a fraction of an hour, rounded to the
/// nearest second; a value rounding up to 24:00:00 lands on the next day.
/// Out-of-range days or hours are errors, never clamped.
pub fn parse_day_of_year(year: &str, day: &str, hours: &str) -> Result<NaiveDateTime> {
    let composed = format!("{}{} {}", year.trim(), day.trim(), hours.trim());

    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| Error::invalid_time(&composed, format!("invalid year '{}'", year)))?;
    let day: u32 = day
        .trim()
        .parse()
        .map_err(|_| Error::invalid_time(&composed, format!("invalid day-of-year '{}'", day)))?;
    let hours: f64 = hours
        .trim()
        .parse()
        .map_err(|_| Error::invalid_time(&composed, format!("invalid hour '{}'", hours)))?;

    let date = NaiveDate::from_yo_opt(year, day).ok_or_else(|| {
        Error::invalid_time(
            &composed,
            format!("day-of-year {} out of range for {}", day, year),
        )
    })?;

    if !(0.0..24.0).contains(&hours) {
        return Err(Error::invalid_time(
            &composed,
            format!("hour {} outside [0, 24)", hours),
        ));
    }

    // Rounding can reach 24:00:00, which rolls over to the next midnight
    let seconds = (hours * SECONDS_PER_HOUR).round() as i64;
    date.and_time(NaiveTime::default())
        .checked_add_signed(Duration::seconds(seconds))
        .ok_or_else(|| Error::invalid_time(&composed, "timestamp out of range"))
}

/// Parse a CEFAS `Time (GMT)` value
pub fn parse_cefas_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), CEFAS_DATETIME_FORMAT).map_err(|e| {
        Error::datetime_parsing(
            format!(
                "Invalid {} value '{}' (expected 'YYYY-MM-DD HH:MM:SS')",
                CEFAS_TIME_COLUMN, value
            ),
            e,
        )
    })
}
