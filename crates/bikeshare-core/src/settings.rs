use clap::Parser;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::CityTable;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore US bike-share trip data interactively
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bike-share trip data interactively",
    version
)]
pub struct Settings {
    /// Directory holding the per-city CSV files
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// JSON file replacing the built-in city table
    #[arg(long)]
    pub cities: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when absent)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The city table for this run: the `--cities` override when given,
    /// otherwise the three built-in cities.
    pub fn city_table(&self) -> Result<CityTable> {
        match &self.cities {
            Some(path) => CityTable::from_json_file(path),
            None => Ok(CityTable::default()),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
