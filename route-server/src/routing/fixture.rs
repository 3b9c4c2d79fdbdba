//! Deterministic routing for tests and offline development.
//!
//! Produces straight-line polylines between consecutive waypoints instead of
//! calling a routing service, so planning scenarios are reproducible
//! without network access.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{Coordinate, RoutePolyline};

use super::RouteProvider;
use super::error::RoutingError;

/// Default number of points generated per leg.
const DEFAULT_POINTS_PER_LEG: usize = 50;

#[derive(Debug, Clone, Copy)]
enum FixtureMode {
    /// Densified straight lines between waypoints.
    StraightLine { points_per_leg: usize },
    /// Successful response with an empty polyline.
    Empty,
    /// Every request fails as if the service were down.
    Unavailable,
}

/// Routing client that never touches the network.
#[derive(Debug, Clone)]
pub struct FixtureRouter {
    mode: FixtureMode,
    calls: Arc<AtomicUsize>,
}

impl FixtureRouter {
    fn with_mode(mode: FixtureMode) -> Self {
        Self {
            mode,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Straight lines with `points_per_leg` segments between each pair of
    /// consecutive waypoints.
    pub fn straight_line(points_per_leg: usize) -> Self {
        Self::with_mode(FixtureMode::StraightLine {
            points_per_leg: points_per_leg.max(1),
        })
    }

    /// A router that answers successfully with no geometry.
    pub fn empty() -> Self {
        Self::with_mode(FixtureMode::Empty)
    }

    /// A router whose every request fails.
    pub fn unavailable() -> Self {
        Self::with_mode(FixtureMode::Unavailable)
    }

    /// Number of route requests served so far (shared between clones).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Default for FixtureRouter {
    fn default() -> Self {
        Self::straight_line(DEFAULT_POINTS_PER_LEG)
    }
}

/// Densify the legs between consecutive waypoints.
fn straight_line(waypoints: &[Coordinate], points_per_leg: usize) -> Vec<Coordinate> {
    let mut points = Vec::with_capacity((waypoints.len() - 1) * points_per_leg + 1);

    for pair in waypoints.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        for step in 0..points_per_leg {
            points.push(from.interpolate(to, step as f64 / points_per_leg as f64));
        }
    }
    if let Some(last) = waypoints.last() {
        points.push(*last);
    }

    points
}

impl RouteProvider for FixtureRouter {
    async fn fetch_route(&self, waypoints: &[Coordinate]) -> Result<RoutePolyline, RoutingError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if waypoints.len() < 2 {
            return Err(RoutingError::TooFewWaypoints(waypoints.len()));
        }

        match self.mode {
            FixtureMode::StraightLine { points_per_leg } => {
                Ok(RoutePolyline::new(straight_line(waypoints, points_per_leg)))
            }
            FixtureMode::Empty => Ok(RoutePolyline::default()),
            FixtureMode::Unavailable => Err(RoutingError::Api {
                status: 503,
                message: "fixture router is unavailable".to_string(),
            }),
        }
    }
}
