//! Runtime selection between live and fixture routing.

use crate::domain::{Coordinate, RoutePolyline};

use super::RouteProvider;
use super::client::OsrmClient;
use super::error::RoutingError;
use super::fixture::FixtureRouter;

/// The routing implementation chosen at startup.
#[derive(Debug, Clone)]
pub enum RoutingBackend {
    /// Live OSRM server.
    Osrm(OsrmClient),
    /// Offline straight-line routing.
    Fixture(FixtureRouter),
}

impl RoutingBackend {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            RoutingBackend::Osrm(_) => "osrm",
            RoutingBackend::Fixture(_) => "fixture",
        }
    }
}

impl RouteProvider for RoutingBackend {
    async fn fetch_route(&self, waypoints: &[Coordinate]) -> Result<RoutePolyline, RoutingError> {
        match self {
            RoutingBackend::Osrm(client) => client.fetch_route(waypoints).await,
            RoutingBackend::Fixture(fixture) => fixture.fetch_route(waypoints).await,
        }
    }
}
