//! The loaded buoy record
//!
//! A [`Buoy`] is created in two steps. [`Buoy::open`] reads and tokenizes the
//! file and locates the header; [`Buoy::load`] derives the time axis, position
//! and data columns. The tokenized lines stay cached on the record so the
//! header and columns can be re-derived without touching the file again.

use super::summary::BuoySummary;
use crate::app::models::{FileProfile, HeaderRegion, Position, RawLine, TimeAxis, TimeSeries};
use crate::app::services::ascii_parser::column_extractor::has_body;
use crate::app::services::ascii_parser::{
    data_columns, extract_numeric, fill_missing, locate_header, reconstruct_time, split_line,
};
use crate::app::services::position_resolver::PositionResolver;
use crate::config::BuoyConfig;
use crate::constants::TIME_COLUMN_NAMES;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A buoy time series file and everything derived from it
#[derive(Debug, Clone)]
pub struct Buoy {
    path: PathBuf,
    profile: FileProfile,
    site: String,
    locations: Option<PathBuf>,
    lines: Vec<RawLine>,

    /// Header block detected when the file was opened
    pub header: HeaderRegion,

    /// Time axis; `None` until [`Buoy::load`] runs
    pub time: Option<TimeAxis>,

    /// Site position; stays `None` when the file has no usable time axis
    pub position: Option<Position>,

    /// Data columns by name; stays `None` when the file has no usable time axis
    pub data: Option<BTreeMap<String, TimeSeries>>,
}

impl Buoy {
    /// Read, tokenize and locate the header of a buoy file
    ///
    /// Non-ASCII bytes are discarded. The tokenizer profile follows the file
    /// extension; empty fields are kept as `NaN` unless the profile drops them.
    pub fn open(path: impl AsRef<Path>, config: &BuoyConfig) -> Result<Self> {
        let path = path.as_ref();
        let profile = FileProfile::from_path(path);

        let lines = read_lines(path, profile)?;
        let header = locate_header(&lines, TIME_COLUMN_NAMES);

        debug!(
            "Opened {} as {:?}: {} lines, header length {}",
            path.display(),
            profile,
            lines.len(),
            header.length
        );

        Ok(Self {
            path: path.to_path_buf(),
            profile,
            site: config.site.clone(),
            locations: config.locations.clone(),
            lines,
            header,
            time: None,
            position: None,
            data: None,
        })
    }

    /// Open and load in one step
    pub fn from_path(
        path: impl AsRef<Path>,
        config: &BuoyConfig,
        resolver: &dyn PositionResolver,
    ) -> Result<Self> {
        let mut buoy = Self::open(path, config)?;
        buoy.load(resolver)?;
        Ok(buoy)
    }

    /// Derive the time axis, position and data columns
    ///
    /// A file with no recognized time convention is not an error: the time
    /// axis is stored empty and `data`/`position` stay `None`. Numeric or
    /// time parse failures abort the load.
    pub fn load(&mut self, resolver: &dyn PositionResolver) -> Result<()> {
        info!("Loading buoy file: {}", self.path.display());

        let time = reconstruct_time(&self.lines, &self.header)?;
        if time.is_empty() {
            warn!(
                "No recognized time convention in {}; leaving data unset",
                self.path.display()
            );
            self.time = Some(time);
            self.position = None;
            self.data = None;
            return Ok(());
        }
        debug!("Time convention: {:?}", time.convention);

        let position = resolver.resolve(self.locations.as_deref(), &self.site)?;
        let data = self.extract_data()?;

        info!(
            "Loaded {} variables x {} samples from {}",
            data.len(),
            time.len(),
            self.path.display()
        );

        self.time = Some(time);
        self.position = Some(position);
        self.data = Some(data);
        Ok(())
    }

    /// Recompute the header from the cached lines and clear derived state
    pub fn rederive(&mut self) {
        self.header = locate_header(&self.lines, TIME_COLUMN_NAMES);
        self.time = None;
        self.position = None;
        self.data = None;
    }

    fn extract_data(&self) -> Result<BTreeMap<String, TimeSeries>> {
        let mut data = BTreeMap::new();
        if !has_body(&self.lines, &self.header) {
            return Ok(data);
        }

        for name in data_columns(&self.header) {
            let values = extract_numeric(&self.lines, &self.header, name)?;
            data.insert(name.to_string(), TimeSeries::new(name, values));
        }
        Ok(data)
    }

    /// Whether a time axis was found and the data extracted
    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// Look up one variable's series
    pub fn series(&self, name: &str) -> Option<&TimeSeries> {
        self.data.as_ref().and_then(|data| data.get(name))
    }

    /// Number of lines after the header block, including ragged ones
    pub fn body_line_count(&self) -> usize {
        self.lines.len().saturating_sub(self.header.length)
    }

    /// Cached tokenized lines
    pub fn lines(&self) -> &[RawLine] {
        &self.lines
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn profile(&self) -> FileProfile {
        self.profile
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    /// Serializable overview for reporting
    pub fn summary(&self) -> BuoySummary {
        BuoySummary::from_buoy(self)
    }
}

/// Read a file in one scoped acquisition and tokenize every line
fn read_lines(path: &Path, profile: FileProfile) -> Result<Vec<RawLine>> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(path.display().to_string())
        } else {
            Error::io(format!("Failed to read file {}", path.display()), e)
        }
    })?;

    let content: String = bytes
        .into_iter()
        .filter(u8::is_ascii)
        .map(char::from)
        .collect();

    let options = profile.options();
    let lines = content
        .lines()
        .map(|line| split_line(line, options))
        .map(|tokens| {
            if profile.preserves_empty_fields() {
                fill_missing(tokens)
            } else {
                tokens
            }
        })
        .collect();

    Ok(lines)
}
