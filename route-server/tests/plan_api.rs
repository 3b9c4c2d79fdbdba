use std::path::Path;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use route_server::catalog::StationCatalog;
use route_server::geocode::{FixtureGeocoder, GeocodingBackend};
use route_server::history::RouteLog;
use route_server::planner::PlanConfig;
use route_server::routing::{CachedRouter, FixtureRouter, RouteCacheConfig, RoutingBackend};
use route_server::web::{AppState, create_router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn shipped_catalog() -> StationCatalog {
    StationCatalog::load(Path::new(env!("CARGO_MANIFEST_DIR")).join("data/stations.json"))
        .expect("catalog")
}

fn state_with(router: FixtureRouter) -> AppState {
    AppState::new(
        CachedRouter::new(RoutingBackend::Fixture(router), &RouteCacheConfig::default()),
        GeocodingBackend::Fixture(FixtureGeocoder::northern_europe()),
        shipped_catalog(),
        PlanConfig::default(),
    )
}

fn test_app() -> Router {
    create_router(state_with(FixtureRouter::default()))
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 4 * 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body)
}

#[tokio::test]
async fn health_check() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".into()));
}

#[tokio::test]
async fn lists_station_catalog() {
    let request = Request::builder()
        .uri("/api/stations")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 16);
    assert_eq!(body["stations"].as_array().unwrap().len(), 16);
    assert!(body["stations"][0]["lat"].is_number());
}

#[tokio::test]
async fn plans_stockholm_to_brussels_by_address() {
    let payload = json!({
        "start": {"address": "Stockholm"},
        "end": {"address": "Brussels"},
        "interval_km": 250,
        "corridor_km": 100
    });
    let (status, body) = send(test_app(), post_json("/api/plan", &payload)).await;

    assert_eq!(status, StatusCode::OK, "{body}");

    let waypoints = body["waypoints"].as_array().unwrap();
    assert!(waypoints.len() >= 3);
    assert_eq!(waypoints[0]["kind"], "location");
    assert_eq!(waypoints[0]["coordinate"]["lat"], 59.3293);
    assert_eq!(waypoints.last().unwrap()["kind"], "location");
    assert!(waypoints.iter().any(|w| w["kind"] == "station"));

    let polyline = body["polyline"].as_array().unwrap();
    let labels = body["labels"].as_array().unwrap();
    assert!(!polyline.is_empty());
    assert_eq!(labels.len(), polyline.len());
    assert_eq!(labels[0]["label"], "start");
    assert_eq!(labels.last().unwrap()["label"], "end");
    assert!(labels.iter().any(|l| l["label"] == "station"));

    let distance = body["distance_km"].as_f64().unwrap();
    assert!(distance > 1200.0 && distance < 1350.0);
}

#[tokio::test]
async fn plans_with_coordinates_and_defaults() {
    let payload = json!({
        "start": {"lat": 53.5511, "lon": 9.9937},
        "end": {"lat": 50.8503, "lon": 4.3517}
    });
    let (status, body) = send(test_app(), post_json("/api/plan", &payload)).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["waypoints"].as_array().unwrap().len() >= 2);
}

#[tokio::test]
async fn empty_station_override_yields_placeholders() {
    let payload = json!({
        "start": {"address": "Stockholm"},
        "end": {"address": "Brussels"},
        "interval_km": 200,
        "stations": []
    });
    let (status, body) = send(test_app(), post_json("/api/plan", &payload)).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let waypoints = body["waypoints"].as_array().unwrap();
    let intermediate = &waypoints[1..waypoints.len() - 1];
    assert!(!intermediate.is_empty());
    assert!(intermediate.iter().all(|w| w["kind"] == "no_station"));
}

#[tokio::test]
async fn station_override_leaves_catalog_untouched() {
    let app = test_app();
    let payload = json!({
        "start": {"address": "Stockholm"},
        "end": {"address": "Brussels"},
        "interval_km": 200,
        "corridor_km": 1000,
        "stations": [{"name": "Aral Bremen", "lat": 53.0793, "lon": 8.8017}]
    });
    let (status, body) = send(app.clone(), post_json("/api/plan", &payload)).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let stations: Vec<&Value> = body["waypoints"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|w| w["kind"] == "station")
        .collect();
    assert!(!stations.is_empty());
    assert!(stations.iter().all(|w| w["station"]["name"] == "Aral Bremen"));

    let request = Request::builder()
        .uri("/api/stations")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 16);
}

#[tokio::test]
async fn unknown_address_is_unprocessable() {
    let payload = json!({
        "start": {"address": "Atlantis"},
        "end": {"address": "Brussels"}
    });
    let (status, body) = send(test_app(), post_json("/api/plan", &payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn invalid_interval_is_bad_request() {
    let payload = json!({
        "start": {"address": "Stockholm"},
        "end": {"address": "Brussels"},
        "interval_km": -5
    });
    let (status, body) = send(test_app(), post_json("/api/plan", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("interval_km"));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let (status, body) = send(test_app(), post_json("/api/plan", &json!({"start": 1}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
}

#[tokio::test]
async fn routing_outage_is_bad_gateway() {
    let app = create_router(state_with(FixtureRouter::unavailable()));
    let payload = json!({
        "start": {"address": "Stockholm"},
        "end": {"address": "Brussels"}
    });
    let (status, body) = send(app, post_json("/api/plan", &payload)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().starts_with("routing unavailable"));
}

#[tokio::test]
async fn empty_route_is_bad_gateway() {
    let app = create_router(state_with(FixtureRouter::empty()));
    let payload = json!({
        "start": {"address": "Stockholm"},
        "end": {"address": "Brussels"}
    });
    let (status, _) = send(app, post_json("/api/plan", &payload)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn corridor_lists_nearby_stations() {
    let payload = json!({
        "start": {"address": "Stockholm"},
        "end": {"address": "Brussels"},
        "corridor_km": 10
    });
    let (status, body) = send(test_app(), post_json("/api/corridor", &payload)).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["corridor_km"], 10.0);

    let stations = body["stations"].as_array().unwrap();
    assert!(!stations.is_empty());
    assert!(stations.len() < 16);
}

#[tokio::test]
async fn completed_plans_are_logged() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("logs/routes.jsonl");
    let state = state_with(FixtureRouter::default()).with_route_log(RouteLog::new(&log_path));
    let app = create_router(state);

    let payload = json!({
        "start": {"address": "Stockholm"},
        "end": {"lat": 50.8503, "lon": 4.3517}
    });
    let (status, _) = send(app.clone(), post_json("/api/plan", &payload)).await;
    assert_eq!(status, StatusCode::OK);

    // Failed plans are not logged
    let failing = json!({
        "start": {"address": "Atlantis"},
        "end": {"address": "Brussels"}
    });
    let (status, _) = send(app, post_json("/api/plan", &failing)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let entries = RouteLog::new(&log_path).read_all().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "Stockholm -> 50.850300, 4.351700");
}
