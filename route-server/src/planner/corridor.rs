//! Corridor filtering of the station catalog.

use std::sync::Arc;

use crate::domain::{Coordinate, Station};
use crate::geomath::is_within_corridor;

/// Stations whose detour cost from the start-end geodesic is at most
/// `corridor_km`.
///
/// Output keeps catalog order and does not deduplicate.
pub fn filter_stations(
    start: Coordinate,
    end: Coordinate,
    stations: &[Arc<Station>],
    corridor_km: f64,
) -> Vec<Arc<Station>> {
    stations
        .iter()
        .filter(|s| is_within_corridor(start, end, s.coordinate, corridor_km))
        .cloned()
        .collect()
}
