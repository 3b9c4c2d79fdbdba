//! HTTP route handlers.

use std::borrow::Cow;
use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::catalog::StationCatalog;
use crate::domain::{Coordinate, Station};
use crate::geocode::{GeocodeError, Geocoder};
use crate::geomath::distance_km;
use crate::history::RouteLogEntry;
use crate::planner::{PlanConfig, PlanError, build_augmented_route, filter_stations, label_points};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/corridor", post(corridor))
        .route("/api/plan", post(plan_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The loaded station catalog.
async fn list_stations(State(state): State<AppState>) -> Response {
    let stations = state.catalog.stations();
    Json(StationsResponse {
        count: stations.len(),
        stations,
    })
    .into_response()
}

/// Parse a JSON body, logging it on failure.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "rejected request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Turn a user-entered endpoint into a coordinate.
async fn resolve<G: Geocoder>(geocoder: &G, input: &LocationInput) -> Result<Coordinate, PlanError> {
    match input {
        LocationInput::Coordinate(c) => Ok(*c),
        LocationInput::Address { address } => Ok(geocoder.geocode(address).await?),
    }
}

/// Resolve both endpoints concurrently.
async fn resolve_endpoints(
    state: &AppState,
    start: &LocationInput,
    end: &LocationInput,
) -> Result<(Coordinate, Coordinate), PlanError> {
    let geocoder = state.geocoder.as_ref();
    futures::try_join!(resolve(geocoder, start), resolve(geocoder, end))
}

/// Stations near the straight start-end line.
async fn corridor(State(state): State<AppState>, body: Bytes) -> Result<Json<CorridorResponse>, AppError> {
    let req: CorridorRequest = parse_body(&body)?;

    let corridor_km = req.corridor_km.unwrap_or(state.config.corridor_km);
    PlanConfig::new(state.config.interval_km, corridor_km).validate()?;

    let (start, end) = resolve_endpoints(&state, &req.start, &req.end).await?;
    let stations = filter_stations(start, end, state.catalog.stations(), corridor_km);

    Ok(Json(CorridorResponse {
        start,
        end,
        corridor_km,
        distance_km: distance_km(start, end),
        stations,
    }))
}

/// Stations supplied with the request, validated like a catalog file.
fn override_stations(stations: Vec<Station>) -> Result<Vec<Arc<Station>>, AppError> {
    if stations.is_empty() {
        return Ok(Vec::new());
    }
    let catalog = StationCatalog::from_stations(stations).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    Ok(catalog.stations().to_vec())
}

/// Plan a route with fuel stops.
async fn plan_route(State(state): State<AppState>, body: Bytes) -> Result<Json<PlanResponse>, AppError> {
    let req: PlanRequest = parse_body(&body)?;

    let defaults = state.config.as_ref();
    let config = PlanConfig {
        interval_km: req.interval_km.unwrap_or(defaults.interval_km),
        corridor_km: req.corridor_km.unwrap_or(defaults.corridor_km),
        ..defaults.clone()
    };
    config.validate()?;

    let stations: Cow<'_, [Arc<Station>]> = match req.stations {
        Some(stations) => Cow::Owned(override_stations(stations)?),
        None => Cow::Borrowed(state.catalog.stations()),
    };

    let (start, end) = resolve_endpoints(&state, &req.start, &req.end).await?;

    let plan = build_augmented_route(state.router.as_ref(), start, end, &stations, &config).await?;
    let labels = label_points(&plan.polyline, &plan.waypoints, config.classify_tolerance_deg);

    if let Some(log) = &state.route_log {
        let entry = RouteLogEntry::new(&req.start.label(), &req.end.label(), start, end);
        match log.append(&entry) {
            Ok(()) => info!(name = %entry.name, "logged route"),
            Err(e) => warn!(error = %e, "failed to write route log"),
        }
    }

    Ok(Json(PlanResponse::new(plan, labels)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unprocessable { message: String },
    BadGateway { message: String },
    GatewayTimeout { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        let message = e.to_string();
        match e {
            PlanError::InvalidRequest(_) => AppError::BadRequest { message },
            PlanError::GeocodeFailure(GeocodeError::NotFound { .. } | GeocodeError::EmptyQuery) => {
                AppError::Unprocessable { message }
            }
            PlanError::GeocodeFailure(_) => AppError::BadGateway { message },
            PlanError::RoutingUnavailable(ref routing) if routing.is_timeout() => {
                AppError::GatewayTimeout { message }
            }
            PlanError::RoutingUnavailable(_) => AppError::BadGateway { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::GatewayTimeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
