//! OSRM route service response types.
//!
//! Only the fields the planner uses are modelled. Geometry is requested as
//! GeoJSON, so coordinates arrive as `[longitude, latitude]` pairs.

use serde::Deserialize;

use crate::domain::{Coordinate, RoutePolyline};

use super::error::RoutingError;

/// Top-level response of `/route/v1/driving/...`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    /// "Ok" on success, otherwise an error code such as "NoRoute".
    pub code: String,

    /// Human-readable error detail, present on failures.
    #[serde(default)]
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// A single route alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    pub geometry: Geometry,

    /// Road distance in meters.
    #[serde(default)]
    pub distance: f64,

    /// Travel time in seconds.
    #[serde(default)]
    pub duration: f64,
}

/// GeoJSON LineString geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub coordinates: Vec<[f64; 2]>,
}

impl RouteResponse {
    /// Convert the first route into a latitude-first polyline.
    pub fn into_polyline(self) -> Result<RoutePolyline, RoutingError> {
        if self.code != "Ok" {
            return Err(RoutingError::NoRoutes);
        }

        let route = self.routes.into_iter().next().ok_or(RoutingError::NoRoutes)?;

        let points = route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| Coordinate::from_lon_lat(lon, lat))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RoutingError::Json {
                message: e.to_string(),
                body: None,
            })?;

        if points.is_empty() {
            return Err(RoutingError::NoRoutes);
        }

        Ok(RoutePolyline::new(points))
    }
}
