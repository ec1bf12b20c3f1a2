//! Station metadata and observation queries
//!
//! Each call opens the database read-only, runs one query and closes the
//! connection before returning; nothing is pooled.

use crate::app::models::{ObservationMatrix, QueryOutcome, StationRecord};
use crate::Result;
use std::path::Path;

/// Whether this build can reach the database
pub fn is_available() -> bool {
    cfg!(feature = "sqlite")
}

/// Quote an SQL identifier, escaping embedded double quotes
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Fetch every row of the `Stations` relation
///
/// Returns one record per station keyed by column name, or
/// `QueryOutcome::Failed` if the database cannot be queried.
pub fn get_buoy_metadata(db: &Path) -> Result<QueryOutcome<Vec<StationRecord>>> {
    imp::get_buoy_metadata(db)
}

/// Fetch the requested fields of one site table as a float matrix
///
/// Table names are matched case-insensitively by SQLite. NULLs become NaN and
/// numeric text is parsed; any other value fails the query. An empty `fields`
/// list returns a zero-width matrix without opening the database.
pub fn get_buoy_data(
    db: &Path,
    table: &str,
    fields: &[&str],
) -> Result<QueryOutcome<ObservationMatrix>> {
    imp::get_buoy_data(db, table, fields)
}

#[cfg(feature = "sqlite")]
mod imp {
    use super::quote_identifier;
    use crate::Result;
    use crate::app::models::{MetadataValue, ObservationMatrix, QueryOutcome, StationRecord};
    use crate::app::services::ascii_parser::column_extractor::parse_value;
    use crate::constants::STATIONS_TABLE;
    use rusqlite::types::ValueRef;
    use rusqlite::{Connection, OpenFlags};
    use std::path::Path;
    use tracing::{debug, error};

    pub fn get_buoy_metadata(db: &Path) -> Result<QueryOutcome<Vec<StationRecord>>> {
        debug!("Reading station metadata from {}", db.display());

        match query_stations(db) {
            Ok(records) => {
                debug!("Read {} station records", records.len());
                Ok(QueryOutcome::Rows(records))
            }
            Err(e) => {
                error!("Station metadata query failed for {}: {}", db.display(), e);
                Ok(QueryOutcome::failed(e.to_string()))
            }
        }
    }

    pub fn get_buoy_data(
        db: &Path,
        table: &str,
        fields: &[&str],
    ) -> Result<QueryOutcome<ObservationMatrix>> {
        if fields.is_empty() {
            debug!("No fields requested from {}; returning empty matrix", table);
            return Ok(QueryOutcome::Rows(ObservationMatrix::empty()));
        }

        debug!("Getting {:?} for {} from {}", fields, table, db.display());

        match query_observations(db, table, fields) {
            Ok(matrix) => {
                debug!("Read {} rows from {}", matrix.rows, table);
                Ok(QueryOutcome::Rows(matrix))
            }
            Err(e) => {
                error!("Observation query failed for {}: {}", table, e);
                Ok(QueryOutcome::failed(e.to_string()))
            }
        }
    }

    fn open_read_only(db: &Path) -> rusqlite::Result<Connection> {
        Connection::open_with_flags(
            db,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    }

    fn query_stations(db: &Path) -> rusqlite::Result<Vec<StationRecord>> {
        let conn = open_read_only(db)?;
        let sql = format!("SELECT * FROM {}", quote_identifier(STATIONS_TABLE));
        let mut stmt = conn.prepare(&sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let rows = stmt.query_map([], |row| {
            let mut record = StationRecord::new();
            for (index, name) in names.iter().enumerate() {
                record.insert(name.clone(), metadata_value(row.get_ref(index)?));
            }
            Ok(record)
        })?;

        let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    fn query_observations(
        db: &Path,
        table: &str,
        fields: &[&str],
    ) -> rusqlite::Result<ObservationMatrix> {
        let conn = open_read_only(db)?;
        let columns: Vec<String> = fields.iter().map(|f| quote_identifier(f)).collect();
        let sql = format!(
            "SELECT {} FROM {}",
            columns.join(","),
            quote_identifier(table)
        );
        let mut stmt = conn.prepare(&sql)?;

        let mut values = Vec::new();
        let mut rows = stmt.query([])?;
        let mut row_count = 0;
        while let Some(row) = rows.next()? {
            for (index, field) in fields.iter().enumerate() {
                let value = row.get_ref(index)?;
                let number = observation_value(value).ok_or_else(|| {
                    rusqlite::Error::InvalidColumnType(index, field.to_string(), value.data_type())
                })?;
                values.push(number);
            }
            row_count += 1;
        }

        Ok(ObservationMatrix {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            rows: row_count,
            columns: fields.len(),
            values,
        })
    }

    fn metadata_value(value: ValueRef<'_>) -> MetadataValue {
        match value {
            ValueRef::Null => MetadataValue::Null,
            ValueRef::Integer(i) => MetadataValue::Integer(i),
            ValueRef::Real(f) => MetadataValue::Real(f),
            ValueRef::Text(bytes) => {
                MetadataValue::Text(String::from_utf8_lossy(bytes).into_owned())
            }
            ValueRef::Blob(bytes) => MetadataValue::Blob(bytes.to_vec()),
        }
    }

    fn observation_value(value: ValueRef<'_>) -> Option<f64> {
        match value {
            ValueRef::Null => Some(f64::NAN),
            ValueRef::Integer(i) => Some(i as f64),
            ValueRef::Real(f) => Some(f),
            ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().and_then(parse_value),
            ValueRef::Blob(_) => None,
        }
    }
}

#[cfg(not(feature = "sqlite"))]
mod imp {
    use crate::app::models::{ObservationMatrix, QueryOutcome, StationRecord};
    use crate::constants::SQLITE_CAPABILITY;
    use crate::{Error, Result};
    use std::path::Path;

    fn unavailable(operation: &str) -> Error {
        Error::capability_unavailable(
            SQLITE_CAPABILITY,
            format!(
                "built without the `sqlite` feature; {} is unavailable",
                operation
            ),
        )
    }

    pub fn get_buoy_metadata(_db: &Path) -> Result<QueryOutcome<Vec<StationRecord>>> {
        Err(unavailable("get_buoy_metadata"))
    }

    pub fn get_buoy_data(
        _db: &Path,
        _table: &str,
        _fields: &[&str],
    ) -> Result<QueryOutcome<ObservationMatrix>> {
        Err(unavailable("get_buoy_data"))
    }
}
