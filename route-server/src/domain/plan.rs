//! Route polylines and completed plans.

use serde::Serialize;

use super::coordinate::Coordinate;
use super::waypoint::Waypoint;
use crate::geomath::distance_km;

/// Ordered path geometry returned by the routing service.
///
/// Order is start-to-end and points are not deduplicated. An empty
/// polyline means routing failed; it never means a zero-length route.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RoutePolyline {
    points: Vec<Coordinate>,
}

impl RoutePolyline {
    /// Create a polyline from ordered points.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// The points in travel order.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Coordinate> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Coordinate> {
        self.points.last()
    }

    /// Sum of great-circle distances between consecutive points.
    ///
    /// Undercounts the driven distance on curvy roads: the polyline is a
    /// chain of straight segments.
    pub fn path_length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| distance_km(pair[0], pair[1]))
            .sum()
    }
}

impl From<Vec<Coordinate>> for RoutePolyline {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}

/// Result of planning a route.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    /// Start, inserted stations or placeholders, end.
    pub waypoints: Vec<Waypoint>,

    /// Path for display.
    pub polyline: RoutePolyline,

    /// Straight-line distance from start to end. A summary figure only;
    /// interval selection works on the polyline.
    pub distance_km: f64,
}

impl RoutePlan {
    /// Waypoints between start and end.
    pub fn intermediate(&self) -> &[Waypoint] {
        match self.waypoints.len() {
            0..=2 => &[],
            n => &self.waypoints[1..n - 1],
        }
    }

    /// Number of placeholder waypoints.
    pub fn placeholder_count(&self) -> usize {
        self.waypoints.iter().filter(|w| w.is_placeholder()).count()
    }
}
