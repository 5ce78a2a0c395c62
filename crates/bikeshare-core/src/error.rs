use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A city source file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A city source file is not valid CSV or lacks a required column.
    #[error("Malformed trip data in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A `Start Time` cell did not match any recognised format.
    #[error("Invalid timestamp on row {row}: {value}")]
    TimestampParse { row: usize, value: String },

    /// A city name is not present in the active city table.
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BikeshareError {
    /// `true` for failures of a city's trip source (missing, unreadable or
    /// malformed). These abort a session iteration but never the program.
    pub fn is_data_source(&self) -> bool {
        matches!(
            self,
            Self::FileRead { .. } | Self::Csv { .. } | Self::TimestampParse { .. }
        )
    }
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;
