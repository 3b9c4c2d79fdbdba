//! Station catalog error types.

use std::path::PathBuf;

/// Errors that can occur when loading the station catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("failed to read station catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid JSON or has invalid coordinates
    #[error("failed to parse station catalog: {message}")]
    Json { message: String },

    /// A station entry is unusable
    #[error("invalid station #{index}: {reason}")]
    InvalidStation { index: usize, reason: String },

    /// The catalog contains no stations
    #[error("station catalog is empty")]
    Empty,
}
