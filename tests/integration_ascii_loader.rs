//! Integration tests for loading buoy exports through the public API
//!
//! Files are written to a temporary directory and loaded end to end, with a
//! locations table driving position resolution.

use buoy_processor::app::services::position_resolver::resolver_for;
use buoy_processor::{Buoy, BuoyConfig, Error, Position, TimeConvention};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn l4_export() -> &'static str {
    "Year\tSerial\tTime\tTemp\tSal\n\
     2021\t32\t0.5\t9.8\t35.2\n\
     2021\t32\t1.0\t9.7\t35.2\n\
     2021\t33\t23.75\t9.6\t35.3\n"
}

#[test]
fn test_wco_export_with_locations_table() {
    let dir = TempDir::new().unwrap();
    let data = write(&dir, "l4_2021.txt", l4_export());
    let locations = write(&dir, "sites.txt", "L4 -4.217 50.25\nE1 -4.368 50.033\n");

    let config = BuoyConfig::default()
        .with_site("E1")
        .with_locations(&locations);
    let resolver = resolver_for(&config);
    let buoy = Buoy::from_path(&data, &config, resolver.as_ref()).unwrap();

    let time = buoy.time.as_ref().unwrap();
    assert_eq!(time.convention, Some(TimeConvention::DayOfYear));
    assert_eq!(
        time.datetime,
        vec![
            NaiveDate::from_ymd_opt(2021, 2, 1).unwrap().and_hms_opt(0, 30, 0).unwrap(),
            NaiveDate::from_ymd_opt(2021, 2, 1).unwrap().and_hms_opt(1, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2021, 2, 2).unwrap().and_hms_opt(23, 45, 0).unwrap(),
        ]
    );
    assert_eq!(buoy.position, Some(Position::new(-4.368, 50.033)));

    let data = buoy.data.as_ref().unwrap();
    assert_eq!(data.keys().collect::<Vec<_>>(), vec!["Sal", "Temp"]);
    assert_eq!(buoy.series("Temp").unwrap().values, vec![9.8, 9.7, 9.6]);
}

#[test]
fn test_unknown_site_is_an_error() {
    let dir = TempDir::new().unwrap();
    let data = write(&dir, "l4_2021.txt", l4_export());
    let locations = write(&dir, "sites.txt", "L4 -4.217 50.25\n");

    let config = BuoyConfig::default()
        .with_site("Q9")
        .with_locations(&locations);
    let resolver = resolver_for(&config);
    let result = Buoy::from_path(&data, &config, resolver.as_ref());

    assert!(matches!(result, Err(Error::PositionNotFound { .. })));
}

#[test]
fn test_file_without_time_columns_keeps_header_only() {
    let dir = TempDir::new().unwrap();
    let data = write(&dir, "plain.txt", "A B C\n1 2 3\n4 5 6\n");

    let config = BuoyConfig::default();
    let resolver = resolver_for(&config);
    let buoy = Buoy::from_path(&data, &config, resolver.as_ref()).unwrap();

    assert_eq!(buoy.header.length, 1);
    assert_eq!(buoy.header.columns, vec!["A", "B", "C"]);
    assert!(buoy.time.as_ref().unwrap().is_empty());
    assert!(buoy.data.is_none());
    assert!(buoy.position.is_none());
    assert!(!buoy.is_loaded());
}

#[test]
fn test_missing_file() {
    let result = Buoy::open("/nonexistent/buoy.csv", &BuoyConfig::default());
    assert!(matches!(result, Err(Error::FileNotFound { .. })));
}
