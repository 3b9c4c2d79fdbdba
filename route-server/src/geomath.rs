//! Great-circle distance and corridor membership.
//!
//! Distances use the WGS-84 geodesic (Karney's algorithm via the `geo`
//! crate), so identical points give exactly zero and antipodal points
//! stay finite.

use geo::{Distance, Geodesic, Point};

use crate::domain::Coordinate;

/// Slack absorbed by the corridor test so that a zero-width corridor
/// still admits points lying on the geodesic (1 mm).
const CORRIDOR_EPSILON_KM: f64 = 1e-6;

/// Geodesic distance between two coordinates in kilometers.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }
    let from = Point::new(a.lon(), a.lat());
    let to = Point::new(b.lon(), b.lat());
    Geodesic.distance(from, to) / 1000.0
}

/// Extra distance incurred by travelling `start → point → end` instead of
/// `start → end` directly.
pub fn detour_km(start: Coordinate, end: Coordinate, point: Coordinate) -> f64 {
    let via = distance_km(start, point) + distance_km(point, end);
    (via - distance_km(start, end)).abs()
}

/// Returns true iff the detour through `point` costs at most `corridor_km`.
///
/// This is a detour-cost test rather than a perpendicular distance: a point
/// far from the straight line can pass if the detour is cheap, and a point
/// close to the line can fail if reaching it means backtracking. Larger
/// corridors only ever admit more points.
pub fn is_within_corridor(
    start: Coordinate,
    end: Coordinate,
    point: Coordinate,
    corridor_km: f64,
) -> bool {
    detour_km(start, end, point) <= corridor_km + CORRIDOR_EPSILON_KM
}
