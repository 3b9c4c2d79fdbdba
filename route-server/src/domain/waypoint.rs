//! Route waypoints.

use std::sync::Arc;

use serde::Serialize;

use super::coordinate::Coordinate;
use super::station::Station;

/// Label carried by a placeholder waypoint when no station was available.
pub const NO_STATION_LABEL: &str = "no station found";

/// A point the route is constrained to pass through.
///
/// Serialized with a `kind` tag so the UI can pick a marker without
/// inspecting the shape of the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Waypoint {
    /// A raw coordinate (the start and end of a plan).
    Location { coordinate: Coordinate },

    /// A station from the catalog.
    Station { station: Arc<Station> },

    /// Interval threshold crossed but the corridor had no stations.
    NoStation { coordinate: Coordinate },
}

impl Waypoint {
    /// Create a raw-coordinate waypoint.
    pub fn location(coordinate: Coordinate) -> Self {
        Waypoint::Location { coordinate }
    }

    /// Create a station waypoint.
    pub fn station(station: Arc<Station>) -> Self {
        Waypoint::Station { station }
    }

    /// Create a "no station found" placeholder at a polyline point.
    pub fn no_station(coordinate: Coordinate) -> Self {
        Waypoint::NoStation { coordinate }
    }

    /// The coordinate the route must pass through.
    pub fn coordinate(&self) -> Coordinate {
        match self {
            Waypoint::Location { coordinate } | Waypoint::NoStation { coordinate } => *coordinate,
            Waypoint::Station { station } => station.coordinate,
        }
    }

    /// Display name, if the waypoint has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Waypoint::Location { .. } => None,
            Waypoint::Station { station } => Some(&station.name),
            Waypoint::NoStation { .. } => Some(NO_STATION_LABEL),
        }
    }

    /// Returns true for placeholder waypoints.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Waypoint::NoStation { .. })
    }
}
