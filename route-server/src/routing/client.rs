//! OSRM HTTP client.
//!
//! Turns an ordered list of waypoints into the full-resolution driving
//! geometry of the best route.

use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{Coordinate, RoutePolyline};

use super::RouteProvider;
use super::error::RoutingError;
use super::types::RouteResponse;

/// Default base URL: the public OSRM demo server.
pub const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the routing service
    pub base_url: String,
    /// Upper bound on a single route request
    pub timeout: Duration,
}

impl OsrmConfig {
    /// Create a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Live routing client backed by an OSRM server.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
}

impl OsrmClient {
    /// Create a new OSRM client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the request URL for a waypoint list.
    ///
    /// OSRM expects `lon,lat` pairs separated by `;`.
    fn route_url(&self, waypoints: &[Coordinate]) -> String {
        let coords = waypoints
            .iter()
            .map(|c| format!("{:.6},{:.6}", c.lon(), c.lat()))
            .collect::<Vec<_>>()
            .join(";");

        format!("{}/route/v1/driving/{}", self.base_url, coords)
    }
}

impl RouteProvider for OsrmClient {
    async fn fetch_route(&self, waypoints: &[Coordinate]) -> Result<RoutePolyline, RoutingError> {
        if waypoints.len() < 2 {
            return Err(RoutingError::TooFewWaypoints(waypoints.len()));
        }

        let url = self.route_url(waypoints);
        debug!(%url, waypoints = waypoints.len(), "requesting route");

        let response = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "routing request failed"))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "routing service returned error status");
            return Err(RoutingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: RouteResponse = serde_json::from_str(&body).map_err(|e| RoutingError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        let polyline = parsed.into_polyline()?;
        debug!(points = polyline.len(), "route received");
        Ok(polyline)
    }
}
