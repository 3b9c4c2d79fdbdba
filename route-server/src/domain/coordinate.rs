//! Geographic coordinate type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing a coordinate outside the valid range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({lat}, {lon}): {reason}")]
pub struct InvalidCoordinate {
    lat: f64,
    lon: f64,
    reason: &'static str,
}

/// A latitude/longitude pair in degrees.
///
/// Latitude is always in [-90, 90] and longitude in [-180, 180]. This type
/// guarantees that any `Coordinate` value is valid by construction, and
/// deserialization goes through the same check.
///
/// Everything inside the crate is latitude-first. Services that speak
/// longitude-first (OSRM, GeoJSON) convert at their own boundary.
///
/// # Examples
///
/// ```
/// use route_server::domain::Coordinate;
///
/// let stockholm = Coordinate::new(59.3293, 18.0686).unwrap();
/// assert_eq!(stockholm.lat(), 59.3293);
///
/// // Out of range is rejected
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, 180.5).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

/// Unvalidated wire form of a coordinate.
#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lon)
    }
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        let reject = |reason| Err(InvalidCoordinate { lat, lon, reason });

        if !lat.is_finite() || !lon.is_finite() {
            return reject("must be finite");
        }
        if !(-90.0..=90.0).contains(&lat) {
            return reject("latitude must be within [-90, 90]");
        }
        if !(-180.0..=180.0).contains(&lon) {
            return reject("longitude must be within [-180, 180]");
        }

        Ok(Self { lat, lon })
    }

    /// Create a coordinate from a longitude-first pair, as used by OSRM
    /// and GeoJSON.
    pub fn from_lon_lat(lon: f64, lat: f64) -> Result<Self, InvalidCoordinate> {
        Self::new(lat, lon)
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Linear interpolation towards `other` in degree space, with `t`
    /// clamped to [0, 1].
    ///
    /// Not a geodesic interpolation; good enough for densifying short legs.
    pub fn interpolate(self, other: Coordinate, t: f64) -> Coordinate {
        let t = t.clamp(0.0, 1.0);
        // A convex combination of two in-range values stays in range.
        Coordinate {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }

    /// Whether `other` lies within `tolerance_deg` of this coordinate on
    /// both axes independently.
    ///
    /// This is a box test, not a radius: a point offset diagonally by
    /// just under the tolerance on each axis still matches.
    pub fn within_box(&self, other: &Coordinate, tolerance_deg: f64) -> bool {
        (self.lat - other.lat).abs() <= tolerance_deg
            && (self.lon - other.lon).abs() <= tolerance_deg
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}
