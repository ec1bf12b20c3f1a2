//! Buoy database access
//!
//! Thin query collaborators over the `buoys.db` SQLite database: station
//! metadata from the `Stations` relation and per-site observation tables.
//!
//! Connection and query failures never raise out of this module. They are
//! logged and returned as [`QueryOutcome::Failed`], so callers must check for
//! the sentinel explicitly. The one hard failure is a build without the
//! `sqlite` feature, which returns [`Error::CapabilityUnavailable`] on first
//! use.
//!
//! [`QueryOutcome::Failed`]: crate::app::models::QueryOutcome::Failed
//! [`Error::CapabilityUnavailable`]: crate::Error::CapabilityUnavailable

pub mod query;

#[cfg(all(test, feature = "sqlite"))]
pub mod tests;

pub use query::{get_buoy_data, get_buoy_metadata, is_available, quote_identifier};
