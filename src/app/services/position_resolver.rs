//! Site position lookup
//!
//! Positions are resolved through the [`PositionResolver`] trait so the loader
//! never hardcodes coordinates. [`FixedPositionResolver`] is the reference
//! implementation and returns a constant coordinate for every site; callers
//! must not rely on it for geographic correctness. [`LocationFileResolver`]
//! reads a `site, lon, lat` table once and serves later lookups from memory.

use crate::app::models::{Position, TokenizeOptions};
use crate::app::services::ascii_parser::column_extractor::parse_value;
use crate::app::services::ascii_parser::split_line;
use crate::config::BuoyConfig;
use crate::constants::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Maps a site identifier to a coordinate
pub trait PositionResolver: Send + Sync {
    fn resolve(&self, locations: Option<&Path>, site: &str) -> Result<Position>;
}

/// Returns the same coordinate for every site
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPositionResolver {
    position: Position,
}

impl FixedPositionResolver {
    /// Resolver returning the reference coordinate `{0, 0}`
    pub fn new() -> Self {
        Self::at(Position::new(DEFAULT_LONGITUDE, DEFAULT_LATITUDE))
    }

    pub fn at(position: Position) -> Self {
        Self { position }
    }
}

impl Default for FixedPositionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionResolver for FixedPositionResolver {
    fn resolve(&self, _locations: Option<&Path>, _site: &str) -> Result<Position> {
        Ok(self.position)
    }
}

/// Looks sites up in a delimited `site, lon, lat` table
///
/// Lines whose coordinates do not parse (such as a header row) are skipped.
/// Without a locations file the reference coordinate is returned. Each table
/// is parsed on first use and cached by path, so one resolver shared across
/// many loads reads the file once.
#[derive(Debug, Default)]
pub struct LocationFileResolver {
    tables: Mutex<HashMap<PathBuf, Arc<HashMap<String, Position>>>>,
}

impl LocationFileResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed table for `path`, read from disk only on the first request
    fn table(&self, path: &Path) -> Result<Arc<HashMap<String, Position>>> {
        let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = tables.get(path) {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(Self::read_table(path)?);
        debug!("Cached {} locations from {}", table.len(), path.display());
        tables.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    /// Parse a locations table into a site lookup
    pub fn read_table(path: &Path) -> Result<HashMap<String, Position>> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::file_not_found(path.display().to_string())
            } else {
                Error::io(format!("Failed to read locations {}", path.display()), e)
            }
        })?;

        let options = TokenizeOptions {
            remove_empty: true,
            remove_trailing: false,
        };

        let mut table = HashMap::new();
        for (line_number, line) in content.lines().enumerate() {
            let tokens = split_line(line, options);
            if tokens.len() < 3 {
                continue;
            }
            match (parse_value(&tokens[1]), parse_value(&tokens[2])) {
                (Some(lon), Some(lat)) => {
                    table.insert(tokens[0].clone(), Position::new(lon, lat));
                }
                _ => debug!(
                    "Skipping locations line {} in {}",
                    line_number + 1,
                    path.display()
                ),
            }
        }

        Ok(table)
    }
}

impl PositionResolver for LocationFileResolver {
    fn resolve(&self, locations: Option<&Path>, site: &str) -> Result<Position> {
        let Some(path) = locations else {
            warn!("No locations file configured; using reference position for {}", site);
            return FixedPositionResolver::new().resolve(None, site);
        };

        self.table(path)?
            .get(site)
            .copied()
            .ok_or_else(|| Error::position_not_found(site, path.display().to_string()))
    }
}

/// Pick a resolver for the configuration
pub fn resolver_for(config: &BuoyConfig) -> Box<dyn PositionResolver> {
    if config.locations.is_some() {
        Box::new(LocationFileResolver::new())
    } else {
        Box::new(FixedPositionResolver::new())
    }
}
