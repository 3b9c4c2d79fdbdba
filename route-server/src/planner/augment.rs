//! Interval-based station insertion along a route.
//!
//! Walks the base polyline accumulating travelled distance and, every time
//! the configured interval is reached, inserts the corridor station nearest
//! to the current point (or a placeholder when the corridor is empty).

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Coordinate, RoutePlan, RoutePolyline, Station, Waypoint};
use crate::geomath::distance_km;
use crate::routing::{RouteProvider, RoutingError};

use super::config::{PlanConfig, PolylinePolicy};
use super::corridor::filter_stations;
use super::error::PlanError;

/// Station nearest to `point`. Ties go to the earliest station.
fn nearest_station(point: Coordinate, candidates: &[Arc<Station>]) -> Option<&Arc<Station>> {
    let mut best: Option<(&Arc<Station>, f64)> = None;

    for station in candidates {
        let d = distance_km(point, station.coordinate);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((station, d)),
        }
    }

    best.map(|(station, _)| station)
}

/// Choose the intermediate waypoints for a polyline.
///
/// Distance is the sum of great-circle hops between consecutive polyline
/// points, so curvy roads are undercounted. Every time the distance since
/// the last insertion reaches `interval_km` a waypoint is emitted at the
/// current point and the accumulator resets.
pub fn select_waypoints(
    polyline: &RoutePolyline,
    candidates: &[Arc<Station>],
    interval_km: f64,
) -> Vec<Waypoint> {
    let mut waypoints = Vec::new();
    let mut accumulated = 0.0;

    for pair in polyline.points().windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        accumulated += distance_km(previous, current);

        if accumulated < interval_km {
            continue;
        }

        let waypoint = match nearest_station(current, candidates) {
            Some(station) => {
                debug!(station = %station.name, at = %current, "inserting station");
                Waypoint::station(station.clone())
            }
            None => {
                debug!(at = %current, "no station in corridor, inserting placeholder");
                Waypoint::no_station(current)
            }
        };
        waypoints.push(waypoint);
        accumulated = 0.0;
    }

    waypoints
}

/// Fetch a route and reject empty geometry.
async fn fetch_non_empty<R: RouteProvider>(
    router: &R,
    waypoints: &[Coordinate],
) -> Result<RoutePolyline, RoutingError> {
    let polyline = router.fetch_route(waypoints).await?;
    if polyline.is_empty() {
        return Err(RoutingError::NoRoutes);
    }
    Ok(polyline)
}

/// Build a route from `start` to `end` with stations inserted at regular
/// intervals.
///
/// Fails with [`PlanError::RoutingUnavailable`] before doing anything else
/// if the base route cannot be fetched. With
/// [`PolylinePolicy::Refetch`] the displayed polyline is re-requested
/// through all waypoints; the waypoint list itself is never changed by
/// that second request.
pub async fn build_augmented_route<R: RouteProvider>(
    router: &R,
    start: Coordinate,
    end: Coordinate,
    stations: &[Arc<Station>],
    config: &PlanConfig,
) -> Result<RoutePlan, PlanError> {
    config.validate()?;

    let base = fetch_non_empty(router, &[start, end]).await?;

    let candidates = filter_stations(start, end, stations, config.corridor_km);
    debug!(
        catalog = stations.len(),
        in_corridor = candidates.len(),
        corridor_km = config.corridor_km,
        "filtered stations"
    );

    let mut waypoints = Vec::with_capacity(2);
    waypoints.push(Waypoint::location(start));
    waypoints.extend(select_waypoints(&base, &candidates, config.interval_km));
    waypoints.push(Waypoint::location(end));

    let polyline = match config.polyline {
        PolylinePolicy::ReuseBase => base,
        PolylinePolicy::Refetch => {
            let coordinates: Vec<Coordinate> = waypoints.iter().map(Waypoint::coordinate).collect();
            fetch_non_empty(router, &coordinates).await?
        }
    };

    let plan = RoutePlan {
        waypoints,
        polyline,
        distance_km: distance_km(start, end),
    };

    info!(
        waypoints = plan.waypoints.len(),
        placeholders = plan.placeholder_count(),
        polyline_points = plan.polyline.len(),
        distance_km = plan.distance_km,
        "route plan built"
    );

    Ok(plan)
}
