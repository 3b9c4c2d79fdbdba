//! Scenario tests for route augmentation against the shipped catalog.

use super::*;
use crate::catalog::StationCatalog;
use crate::domain::{Coordinate, RoutePolyline, Station, Waypoint};
use crate::routing::{FixtureRouter, RouteProvider, RoutingError};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

fn stockholm() -> Coordinate {
    coord(59.3293, 18.0686)
}

fn brussels() -> Coordinate {
    coord(50.8503, 4.3517)
}

fn shipped_stations() -> Vec<Arc<Station>> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/stations.json");
    StationCatalog::load(path).unwrap().stations().to_vec()
}

/// Router that answers the first request and fails every later one.
struct FailsAfterFirst {
    calls: AtomicUsize,
    inner: FixtureRouter,
}

impl FailsAfterFirst {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            inner: FixtureRouter::default(),
        }
    }
}

impl RouteProvider for FailsAfterFirst {
    async fn fetch_route(&self, waypoints: &[Coordinate]) -> Result<RoutePolyline, RoutingError> {
        if self.calls.fetch_add(1, Ordering::Relaxed) == 0 {
            self.inner.fetch_route(waypoints).await
        } else {
            Err(RoutingError::Timeout)
        }
    }
}

#[tokio::test]
async fn stockholm_to_brussels_inserts_stations() {
    let router = FixtureRouter::default();
    let config = PlanConfig::new(250.0, 100.0);

    let plan = build_augmented_route(&router, stockholm(), brussels(), &shipped_stations(), &config)
        .await
        .unwrap();

    assert!(plan.waypoints.len() >= 3);
    assert_eq!(plan.waypoints.first(), Some(&Waypoint::location(stockholm())));
    assert_eq!(plan.waypoints.last(), Some(&Waypoint::location(brussels())));

    let intermediate = plan.intermediate();
    assert!(!intermediate.is_empty());
    assert!(intermediate.iter().any(|w| matches!(w, Waypoint::Station { .. })));
    assert_eq!(plan.placeholder_count(), 0);

    assert!(plan.distance_km > 1200.0 && plan.distance_km < 1350.0);
    assert!(!plan.polyline.is_empty());
}

#[tokio::test]
async fn refetched_polyline_visits_every_waypoint() {
    let router = FixtureRouter::straight_line(10);
    let config = PlanConfig::new(250.0, 100.0);

    let plan = build_augmented_route(&router, stockholm(), brussels(), &shipped_stations(), &config)
        .await
        .unwrap();

    for waypoint in &plan.waypoints {
        assert!(plan.polyline.points().contains(&waypoint.coordinate()));
    }
    assert_eq!(router.call_count(), 2);
}

#[tokio::test]
async fn reuse_base_fetches_once() {
    let router = FixtureRouter::straight_line(10);
    let config = PlanConfig::new(250.0, 100.0).with_polyline(PolylinePolicy::ReuseBase);

    let plan = build_augmented_route(&router, stockholm(), brussels(), &shipped_stations(), &config)
        .await
        .unwrap();

    assert_eq!(router.call_count(), 1);
    assert_eq!(plan.polyline.first(), Some(&stockholm()));
    assert_eq!(plan.polyline.last(), Some(&brussels()));
    // 10 segments, 11 points
    assert_eq!(plan.polyline.len(), 11);
}

#[tokio::test]
async fn empty_polyline_is_routing_unavailable() {
    let router = FixtureRouter::empty();

    let result = build_augmented_route(
        &router,
        stockholm(),
        brussels(),
        &shipped_stations(),
        &PlanConfig::default(),
    )
    .await;

    assert!(matches!(
        result,
        Err(PlanError::RoutingUnavailable(RoutingError::NoRoutes))
    ));
}

#[tokio::test]
async fn unavailable_service_is_routing_unavailable() {
    let router = FixtureRouter::unavailable();

    let err = build_augmented_route(
        &router,
        stockholm(),
        brussels(),
        &shipped_stations(),
        &PlanConfig::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PlanError::RoutingUnavailable(_)));
    assert!(!err.is_timeout());
    assert_eq!(router.call_count(), 1);
}

#[tokio::test]
async fn failed_refetch_fails_the_plan() {
    let router = FailsAfterFirst::new();

    let err = build_augmented_route(
        &router,
        stockholm(),
        brussels(),
        &shipped_stations(),
        &PlanConfig::default(),
    )
    .await
    .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(router.calls.load(Ordering::Relaxed), 2);
}

#[tokio::test]
async fn empty_catalog_yields_only_placeholders() {
    let router = FixtureRouter::default();
    let config = PlanConfig::new(100.0, 100.0);

    let plan = build_augmented_route(&router, stockholm(), brussels(), &[], &config)
        .await
        .unwrap();

    let intermediate = plan.intermediate();
    assert!(!intermediate.is_empty());
    assert!(intermediate.iter().all(Waypoint::is_placeholder));
    assert_eq!(plan.placeholder_count(), intermediate.len());
}

#[tokio::test]
async fn narrow_corridor_without_matches_yields_placeholders() {
    // Stations far from the Stockholm-Brussels line
    let stations = vec![
        Arc::new(Station::new("Madrid", coord(40.4168, -3.7038))),
        Arc::new(Station::new("Rome", coord(41.9028, 12.4964))),
    ];
    let router = FixtureRouter::default();

    let plan = build_augmented_route(
        &router,
        stockholm(),
        brussels(),
        &stations,
        &PlanConfig::new(250.0, 10.0),
    )
    .await
    .unwrap();

    assert!(plan.intermediate().iter().all(Waypoint::is_placeholder));
}

#[tokio::test]
async fn interval_beyond_route_length_adds_at_most_one() {
    let router = FixtureRouter::default();
    let config = PlanConfig::new(5000.0, 100.0);

    let plan = build_augmented_route(&router, stockholm(), brussels(), &shipped_stations(), &config)
        .await
        .unwrap();

    assert!(plan.intermediate().len() <= 1);
    assert_eq!(plan.waypoints.len(), 2);
}

#[tokio::test]
async fn invalid_config_is_rejected_before_routing() {
    let router = FixtureRouter::default();

    let err = build_augmented_route(
        &router,
        stockholm(),
        brussels(),
        &shipped_stations(),
        &PlanConfig::new(0.0, 100.0),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PlanError::InvalidRequest(_)));
    assert_eq!(router.call_count(), 0);
}

#[tokio::test]
async fn plan_is_deterministic() {
    let stations = shipped_stations();
    let config = PlanConfig::new(150.0, 50.0);

    let a = build_augmented_route(&FixtureRouter::default(), stockholm(), brussels(), &stations, &config)
        .await
        .unwrap();
    let b = build_augmented_route(&FixtureRouter::default(), stockholm(), brussels(), &stations, &config)
        .await
        .unwrap();

    assert_eq!(a.waypoints, b.waypoints);
    assert_eq!(a.polyline, b.polyline);
}
