//! Fuel-stop planning along a driving route.
//!
//! Given a start, an end and the station catalog, the planner fetches the
//! base route, keeps only stations within a detour corridor, and inserts
//! the nearest one every time the configured interval has been driven.
//! Where the corridor is empty it inserts a "no station found" placeholder
//! instead of failing.

mod augment;
mod classify;
mod config;
mod corridor;
mod error;

#[cfg(test)]
mod augment_tests;

pub use augment::{build_augmented_route, select_waypoints};
pub use classify::{Label, LabeledPoint, classify, label_points};
pub use config::{PlanConfig, PolylinePolicy};
pub use corridor::filter_stations;
pub use error::PlanError;
