//! Buoy Processor Library
//!
//! A Rust library for loading loosely structured ASCII time series exported by
//! ocean buoy networks (CEFAS SmartBuoys, Western Channel Observatory moorings)
//! into per-variable series with a reconstructed timestamp axis.
//!
//! This library provides tools for:
//! - Sniffing delimiters and tokenizing ragged ASCII exports
//! - Locating multi-row header blocks keyed on known time column names
//! - Extracting aligned numeric columns while dropping ragged rows
//! - Reconstructing absolute timestamps from source-specific time conventions
//! - Resolving site positions through a pluggable resolver
//! - Querying station metadata and observations from a SQLite buoy database

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod ascii_parser;
        pub mod buoy_database;
        pub mod buoy_loader;
        pub mod position_resolver;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{HeaderRegion, Position, TimeAxis, TimeConvention, TimeSeries};
pub use app::services::buoy_loader::Buoy;
pub use config::BuoyConfig;

/// Result type alias for the buoy processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for buoy loading and database access
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// A data or time value could not be coerced
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Time components parsed but do not form a valid instant
    #[error("Invalid time value '{value}': {reason}")]
    InvalidTime { value: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Site missing from a locations table
    #[error("Position not found for site '{site}' in {locations}")]
    PositionNotFound { site: String, locations: String },

    /// Runtime lacks an optional capability (e.g. built without SQLite)
    #[error("Capability unavailable: {capability} ({message})")]
    CapabilityUnavailable { capability: String, message: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid time error
    pub fn invalid_time(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTime {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a position not found error
    pub fn position_not_found(site: impl Into<String>, locations: impl Into<String>) -> Self {
        Self::PositionNotFound {
            site: site.into(),
            locations: locations.into(),
        }
    }

    /// Create a capability unavailable error
    pub fn capability_unavailable(
        capability: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::CapabilityUnavailable {
            capability: capability.into(),
            message: message.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
