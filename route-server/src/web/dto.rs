//! Data transfer objects for web requests and responses.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, RoutePlan, RoutePolyline, Station, Waypoint};
use crate::planner::LabeledPoint;

/// A route endpoint as entered by the user.
///
/// Either free text to geocode or a coordinate typed in directly:
///
/// ```json
/// {"address": "Stockholm"}
/// {"lat": 59.3293, "lon": 18.0686}
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LocationInput {
    Address { address: String },
    Coordinate(Coordinate),
}

impl LocationInput {
    /// Human-readable label used in the route log.
    pub fn label(&self) -> String {
        match self {
            LocationInput::Address { address } => address.trim().to_string(),
            LocationInput::Coordinate(c) => c.to_string(),
        }
    }
}

/// Request to plan a route with fuel stops.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub start: LocationInput,
    pub end: LocationInput,

    /// Distance between stops (km); server default when absent
    pub interval_km: Option<f64>,

    /// Maximum detour for a station (km); server default when absent
    pub corridor_km: Option<f64>,

    /// Stations to use instead of the loaded catalog, for this request only
    pub stations: Option<Vec<Station>>,
}

/// A planned route.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    /// Start, inserted stops and end, in driving order
    pub waypoints: Vec<Waypoint>,

    /// Path to draw on the map
    pub polyline: RoutePolyline,

    /// Every polyline point with its label, for the table view
    pub labels: Vec<LabeledPoint>,

    /// Straight-line distance from start to end (km)
    pub distance_km: f64,
}

impl PlanResponse {
    pub fn new(plan: RoutePlan, labels: Vec<LabeledPoint>) -> Self {
        Self {
            waypoints: plan.waypoints,
            polyline: plan.polyline,
            labels,
            distance_km: plan.distance_km,
        }
    }
}

/// Request for the stations near the straight start-end line.
#[derive(Debug, Deserialize)]
pub struct CorridorRequest {
    pub start: LocationInput,
    pub end: LocationInput,
    pub corridor_km: Option<f64>,
}

/// Stations inside the corridor, for the marker view.
#[derive(Debug, Serialize)]
pub struct CorridorResponse {
    pub start: Coordinate,
    pub end: Coordinate,
    pub corridor_km: f64,
    pub distance_km: f64,
    pub stations: Vec<Arc<Station>>,
}

/// The loaded station catalog.
#[derive(Debug, Serialize)]
pub struct StationsResponse<'a> {
    pub count: usize,
    pub stations: &'a [Arc<Station>],
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
