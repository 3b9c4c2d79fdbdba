//! Routing service integration.
//!
//! Turns an ordered list of waypoints into the polyline of the driven path.
//! The planner only sees the [`RouteProvider`] capability; the live OSRM
//! client and the offline fixture router both implement it, and
//! [`CachedRouter`] can wrap either.
//!
//! Key characteristics of the routing boundary:
//! - Coordinates are latitude-first inside the crate and converted to
//!   OSRM's longitude-first order only when building requests and reading
//!   responses
//! - Every failure is returned as a [`RoutingError`]; nothing panics past
//!   this boundary
//! - An empty polyline is a failure, never a zero-length route

mod backend;
mod cache;
mod client;
mod error;
mod fixture;
mod types;

use std::future::Future;

use crate::domain::{Coordinate, RoutePolyline};

pub use backend::RoutingBackend;
pub use cache::{CachedRouter, RouteCacheConfig};
pub use client::{DEFAULT_BASE_URL, OsrmClient, OsrmConfig};
pub use error::RoutingError;
pub use fixture::FixtureRouter;
pub use types::{Geometry, Route, RouteResponse};

/// Trait for fetching driving routes.
///
/// This abstraction allows the planner to be tested without network access.
pub trait RouteProvider {
    /// Fetch the polyline of the best route visiting `waypoints` in order.
    fn fetch_route(
        &self,
        waypoints: &[Coordinate],
    ) -> impl Future<Output = Result<RoutePolyline, RoutingError>> + Send;
}
