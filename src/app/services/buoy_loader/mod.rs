//! Buoy file loading
//!
//! Orchestrates the ASCII parser for a single file: read, tokenize by profile,
//! locate the header, rebuild the time axis and, when one exists, resolve the
//! site position and extract every data column.
//!
//! ```rust,no_run
//! use buoy_processor::{Buoy, BuoyConfig};
//! use buoy_processor::app::services::position_resolver::FixedPositionResolver;
//!
//! # fn example() -> buoy_processor::Result<()> {
//! let config = BuoyConfig::default();
//! let mut buoy = Buoy::open("L4_2020.txt", &config)?;
//! buoy.load(&FixedPositionResolver::new())?;
//!
//! if let Some(temp) = buoy.series("Temp") {
//!     println!("{} temperature samples", temp.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod buoy;
pub mod summary;

#[cfg(test)]
pub mod tests;

pub use buoy::Buoy;
pub use summary::BuoySummary;
