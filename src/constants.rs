//! Application constants for the buoy processor
//!
//! Recognized column names, delimiter candidates, time formats and default
//! values shared by the parser, loader and CLI.

// =============================================================================
// Column Names
// =============================================================================

/// Time column names that identify header lines and time-axis columns.
///
/// Shared by header detection and time reconstruction; a line belongs to the
/// header block when any of its tokens equals one of these names.
pub const TIME_COLUMN_NAMES: &[&str] = &[
    "Year",
    "Serial",
    "Jd",
    "Time",
    "Time_GMT",
    "Date_YYMMDD",
    "Time_HHMMSS",
    "Date/Time_GMT",
];

/// Timestamp column used by CEFAS SmartBuoy exports
pub const CEFAS_TIME_COLUMN: &str = "Time (GMT)";

/// Year column of the Western Channel Observatory day-of-year convention
pub const WCO_YEAR_COLUMN: &str = "Year";

/// Day-of-year column of the Western Channel Observatory convention
pub const WCO_DAY_OF_YEAR_COLUMN: &str = "Serial";

/// Decimal-hour column of the Western Channel Observatory convention
pub const WCO_HOUR_COLUMN: &str = "Time";

// =============================================================================
// Tokenizer
// =============================================================================

/// Delimiter candidates in priority order
pub const DELIMITERS: &[char] = &[';', ',', '\t', ' '];

/// Placeholder substituted for empty fields when they are preserved
pub const MISSING_VALUE_MARKER: &str = "NaN";

// =============================================================================
// Time Reconstruction
// =============================================================================

/// Datetime layout of the CEFAS `Time (GMT)` column
pub const CEFAS_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Seconds per hour, used when converting decimal hours
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Minimum number of body lines before any column is extracted
pub const MIN_BODY_LINES: usize = 2;

// =============================================================================
// Loader Defaults
// =============================================================================

/// File extension of CEFAS comma-separated exports
pub const CSV_EXTENSION: &str = "csv";

/// File extension of WCO space-separated exports
pub const TXT_EXTENSION: &str = "txt";

/// Site used when none is configured (Western Channel Observatory L4)
pub const DEFAULT_SITE: &str = "L4";

/// Reference coordinate returned by the fixed position resolver
pub const DEFAULT_LONGITUDE: f64 = 0.0;
pub const DEFAULT_LATITUDE: f64 = 0.0;

// =============================================================================
// Database
// =============================================================================

/// Station metadata relation in the buoy database
pub const STATIONS_TABLE: &str = "Stations";

/// Name of the optional database capability
pub const SQLITE_CAPABILITY: &str = "sqlite";

// =============================================================================
// CLI / Configuration
// =============================================================================

/// Default configuration file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "buoy-processor.toml";

/// Environment variable overriding the configured site
pub const ENV_SITE: &str = "BUOY_SITE";

/// Environment variable overriding the locations file
pub const ENV_LOCATIONS: &str = "BUOY_LOCATIONS";

/// Default log level when no verbosity flags are given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Progress bar template for multi-file loads
pub const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
