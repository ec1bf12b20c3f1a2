//! Test utilities for buoy database queries
//!
//! Builds a small `buoys.db` fixture with a `Stations` relation and one
//! observation table per site.

use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;


/// Create a fixture database and return its directory guard and path
pub fn create_test_database() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("buoys.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE Stations (
            Station TEXT,
            Lon REAL,
            Lat REAL,
            Depth INTEGER,
            Notes TEXT
        );
        INSERT INTO Stations VALUES ('L4', -4.217, 50.25, 54, 'WCO mooring');
        INSERT INTO Stations VALUES ('E1', -4.368, 50.033, 75, NULL);

        CREATE TABLE hastings_wavenet_site (
            Depth REAL,
            Temperature REAL,
            Flag TEXT
        );
        INSERT INTO hastings_wavenet_site VALUES (1.0, 12.5, 'ok');
        INSERT INTO hastings_wavenet_site VALUES (2.0, NULL, 'ok');
        INSERT INTO hastings_wavenet_site VALUES (3, '12.9', 'ok');
        "#,
    )
    .unwrap();

    (dir, path)
}
