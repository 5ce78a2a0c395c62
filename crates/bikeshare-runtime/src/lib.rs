//! Interactive layer for the bikeshare explorer.
//!
//! Provides the console port, validated prompts, the raw-row pager, report
//! rendering and the session controller that ties them together.

pub mod console;
pub mod pager;
pub mod prompts;
pub mod render;
pub mod session;

pub use bikeshare_core as core;
pub use bikeshare_data as data;
