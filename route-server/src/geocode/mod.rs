//! Address geocoding.
//!
//! Resolves free-text addresses to coordinates through an external lookup
//! service. A miss is terminal for the request and is never retried.

mod error;
mod fixture;
mod nominatim;

use std::future::Future;

use crate::domain::Coordinate;

pub use error::GeocodeError;
pub use fixture::FixtureGeocoder;
pub use nominatim::{DEFAULT_BASE_URL, NominatimClient, NominatimConfig};

/// Trait for resolving addresses.
pub trait Geocoder {
    /// Resolve `query` to a coordinate.
    fn geocode(&self, query: &str) -> impl Future<Output = Result<Coordinate, GeocodeError>> + Send;
}

/// The geocoding implementation chosen at startup.
#[derive(Debug, Clone)]
pub enum GeocodingBackend {
    Nominatim(NominatimClient),
    Fixture(FixtureGeocoder),
}

impl Geocoder for GeocodingBackend {
    async fn geocode(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        match self {
            GeocodingBackend::Nominatim(client) => client.geocode(query).await,
            GeocodingBackend::Fixture(fixture) => fixture.geocode(query).await,
        }
    }
}
