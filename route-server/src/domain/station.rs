//! Refueling station type.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;

/// A named refueling station.
///
/// Stations come from the reference catalog loaded at startup and are
/// shared as `Arc<Station>` for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Display name (usually the street address).
    pub name: String,

    /// Location of the station.
    #[serde(flatten)]
    pub coordinate: Coordinate,
}

impl Station {
    /// Create a new station.
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_flat_fields() {
        let json = r#"{"name": "Circle K Helsingborg", "lat": 56.0465, "lon": 12.6945}"#;
        let station: Station = serde_json::from_str(json).unwrap();

        assert_eq!(station.name, "Circle K Helsingborg");
        assert_eq!(station.coordinate.lat(), 56.0465);
        assert_eq!(station.coordinate.lon(), 12.6945);
    }

    #[test]
    fn deserialize_rejects_invalid_coordinate() {
        let json = r#"{"name": "Broken", "lat": 454.54, "lon": 86.48}"#;
        assert!(serde_json::from_str::<Station>(json).is_err());
    }

    #[test]
    fn serialize_roundtrip_shape() {
        let station = Station::new("Aral Hamburg", Coordinate::new(53.55, 10.0).unwrap());
        let value = serde_json::to_value(&station).unwrap();

        assert_eq!(value["name"], "Aral Hamburg");
        assert_eq!(value["lat"], 53.55);
        assert_eq!(value["lon"], 10.0);
    }

    #[test]
    fn display() {
        let station = Station::new("Shell Odense", Coordinate::new(55.4, 10.39).unwrap());
        assert_eq!(station.to_string(), "Shell Odense (55.400000, 10.390000)");
    }
}
