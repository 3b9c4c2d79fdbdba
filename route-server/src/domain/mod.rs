//! Domain types for the route planner.
//!
//! These are the values that flow between the routing client, the
//! planner and the web layer. Coordinates enforce their range at
//! construction time, so code that receives one can trust it.

mod coordinate;
mod plan;
mod station;
mod waypoint;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use plan::{RoutePlan, RoutePolyline};
pub use station::Station;
pub use waypoint::{NO_STATION_LABEL, Waypoint};
