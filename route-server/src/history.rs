//! Append-only log of completed route plans.
//!
//! One JSON object per line:
//!
//! ```json
//! {"name":"Stockholm -> Brussels","start":{"lat":59.3293,"lon":18.0686},"end":{"lat":50.8503,"lon":4.3517},"logged_at":"2026-05-01T09:30:00Z"}
//! ```

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Coordinate;

/// Errors from reading or writing the route log.
#[derive(Debug, thiserror::Error)]
pub enum RouteLogError {
    /// Filesystem operation failed
    #[error("route log I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line could not be encoded or decoded
    #[error("route log JSON error on line {line}: {message}")]
    Json { line: usize, message: String },
}

/// A single logged plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLogEntry {
    /// `"<start> -> <end>"`
    pub name: String,
    pub start: Coordinate,
    pub end: Coordinate,
    pub logged_at: DateTime<Utc>,
}

impl RouteLogEntry {
    /// Create an entry stamped with the current time.
    pub fn new(start_label: &str, end_label: &str, start: Coordinate, end: Coordinate) -> Self {
        Self {
            name: format!("{start_label} -> {end_label}"),
            start,
            end,
            logged_at: Utc::now(),
        }
    }
}

/// JSON-lines route log on disk.
#[derive(Debug)]
pub struct RouteLog {
    path: PathBuf,
    // Serializes appends from concurrent requests
    write_lock: Mutex<()>,
}

impl RouteLog {
    /// Create a log writing to `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> RouteLogError {
        RouteLogError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Append one entry.
    ///
    /// Creates parent directories if they don't exist.
    pub fn append(&self, entry: &RouteLogEntry) -> Result<(), RouteLogError> {
        let mut line = serde_json::to_string(entry).map_err(|e| RouteLogError::Json {
            line: 0,
            message: e.to_string(),
        })?;
        line.push('\n');

        // A poisoned lock only means another append panicked mid-write
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| self.io_error(e))?;

        Ok(())
    }

    /// Read every entry back in append order.
    ///
    /// A missing file is an empty log. Blank lines are skipped.
    pub fn read_all(&self) -> Result<Vec<RouteLogEntry>, RouteLogError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|e| RouteLogError::Json {
                    line: index + 1,
                    message: e.to_string(),
                })
            })
            .collect()
    }
}
