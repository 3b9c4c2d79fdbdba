use route_server::catalog::StationCatalog;
use route_server::config::ServerConfig;
use route_server::geocode::{FixtureGeocoder, GeocodingBackend, NominatimClient, NominatimConfig};
use route_server::history::RouteLog;
use route_server::routing::{
    CachedRouter, FixtureRouter, OsrmClient, OsrmConfig, RouteCacheConfig, RoutingBackend,
};
use route_server::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "route_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Station catalog (fail fast if unavailable)
    let catalog = StationCatalog::load(&config.catalog_path).expect("Failed to load station catalog");

    let (routing, geocoder) = if config.use_fixtures {
        warn!("using offline fixture routing and geocoding");
        (
            RoutingBackend::Fixture(FixtureRouter::default()),
            GeocodingBackend::Fixture(FixtureGeocoder::northern_europe()),
        )
    } else {
        let osrm = OsrmClient::new(
            OsrmConfig::new(&config.osrm_base_url).with_timeout(config.routing_timeout),
        )
        .expect("Failed to create routing client");
        let nominatim = NominatimClient::new(
            NominatimConfig::new(&config.nominatim_base_url).with_timeout(config.geocoding_timeout),
        )
        .expect("Failed to create geocoding client");
        (
            RoutingBackend::Osrm(osrm),
            GeocodingBackend::Nominatim(nominatim),
        )
    };
    info!(
        routing = routing.kind(),
        osrm = %config.osrm_base_url,
        timeout_secs = config.routing_timeout.as_secs(),
        "routing backend ready"
    );

    let router = CachedRouter::new(routing, &RouteCacheConfig::default());

    let mut state = AppState::new(router, geocoder, catalog, config.plan.clone());
    match &config.route_log_path {
        Some(path) => {
            info!(path = %path.display(), "logging completed routes");
            state = state.with_route_log(RouteLog::new(path));
        }
        None => info!("route log disabled"),
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind listener");
    info!("Route planner listening on http://{}", config.addr);
    info!("API Endpoints:");
    info!("  GET  /health        - Health check");
    info!("  GET  /api/stations  - Station catalog");
    info!("  POST /api/corridor  - Stations near the start-end line");
    info!("  POST /api/plan      - Plan a route with fuel stops");

    axum::serve(listener, app).await.expect("Server error");
}
