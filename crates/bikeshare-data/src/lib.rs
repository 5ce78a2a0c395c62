//! Data layer for the bikeshare explorer.
//!
//! Loads a city's CSV trips, narrows them by month and weekday, and runs the
//! time, station, duration and user reports over the result.

pub mod aggregator;
pub mod analysis;
pub mod filter;
pub mod reader;

pub use bikeshare_core as core;
