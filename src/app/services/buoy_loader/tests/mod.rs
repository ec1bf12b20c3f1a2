//! Test utilities for buoy loading
//!
//! Fixture files are written into a temporary directory so the extension
//! drives profile selection exactly as it does for real exports.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;


/// Write `content` to `name` inside a fresh temporary directory
pub fn fixture_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

/// WCO L4 export: units row, names row, space-aligned body
pub fn create_wco_txt() -> String {
    "Year  Serial  Time   degC   PSU    mg/m3\n\
     Year  Serial  Time   Temp   Sal    Chl\n\
     2020  100     12.30  15.2   35.1   0.41\n\
     2020  101     13.00  15.4   35.0   0.39\n\
     2020  102     06.50  15.1   34.9   0.52\n"
        .to_string()
}

/// CEFAS SmartBuoy export with trailing separators and embedded empties
pub fn create_cefas_csv() -> String {
    "Time (GMT),Temperature,Salinity,Turbidity\n\
     2019-06-01 00:00:00,12.1,34.5,0.7,,\n\
     2019-06-01 00:30:00,12.3,,0.8,\n\
     2019-06-01 01:00:00,12.2,34.6,0.9\n"
        .to_string()
}
