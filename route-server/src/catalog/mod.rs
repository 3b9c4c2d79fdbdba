//! Station reference catalog.
//!
//! The catalog is read from a JSON data file once at process start and
//! shared read-only for the lifetime of the process: it is wrapped in an
//! `Arc` by the caller and never mutated, so concurrent requests can use it
//! without copying or locking.
//!
//! File format:
//!
//! ```json
//! { "stations": [ { "name": "Aral Bremen", "lat": 53.0793, "lon": 8.8017 } ] }
//! ```

mod error;

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::Station;

pub use error::CatalogError;

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    stations: Vec<Station>,
}

/// The loaded, immutable station catalog.
#[derive(Debug, Clone)]
pub struct StationCatalog {
    stations: Vec<Arc<Station>>,
}

impl StationCatalog {
    /// Load and validate the catalog file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), stations = catalog.len(), "loaded station catalog");
        Ok(catalog)
    }

    /// Parse and validate a catalog from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json).map_err(|e| CatalogError::Json {
            message: e.to_string(),
        })?;
        Self::from_stations(file.stations)
    }

    /// Build a catalog from stations already in memory.
    ///
    /// Names must be non-blank and the list must not be empty. Duplicate
    /// entries are kept: two stations at the same spot are two stations.
    pub fn from_stations(stations: Vec<Station>) -> Result<Self, CatalogError> {
        if stations.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (index, station) in stations.iter().enumerate() {
            if station.name.trim().is_empty() {
                return Err(CatalogError::InvalidStation {
                    index,
                    reason: "name is blank".to_string(),
                });
            }
        }

        Ok(Self {
            stations: stations.into_iter().map(Arc::new).collect(),
        })
    }

    /// Stations in catalog order.
    pub fn stations(&self) -> &[Arc<Station>] {
        &self.stations
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Always false for a successfully built catalog.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
