//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::StationCatalog;
use crate::geocode::GeocodingBackend;
use crate::history::RouteLog;
use crate::planner::PlanConfig;
use crate::routing::{CachedRouter, RoutingBackend};

/// Shared application state.
///
/// Contains all the services needed to handle requests. Everything is
/// read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Cached routing client
    pub router: Arc<CachedRouter<RoutingBackend>>,

    /// Address lookup
    pub geocoder: Arc<GeocodingBackend>,

    /// Station catalog loaded at startup
    pub catalog: Arc<StationCatalog>,

    /// Default planning parameters
    pub config: Arc<PlanConfig>,

    /// Where completed plans are recorded, if anywhere
    pub route_log: Option<Arc<RouteLog>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        router: CachedRouter<RoutingBackend>,
        geocoder: GeocodingBackend,
        catalog: StationCatalog,
        config: PlanConfig,
    ) -> Self {
        Self {
            router: Arc::new(router),
            geocoder: Arc::new(geocoder),
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            route_log: None,
        }
    }

    /// Record completed plans in `log`.
    pub fn with_route_log(mut self, log: RouteLog) -> Self {
        self.route_log = Some(Arc::new(log));
        self
    }
}
