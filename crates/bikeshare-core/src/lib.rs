//! Domain types shared by the bikeshare crates.
//!
//! Holds the trip record and city table, the month/day selectors, the error
//! taxonomy, CLI settings and text formatting helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{BikeshareError, Result};
