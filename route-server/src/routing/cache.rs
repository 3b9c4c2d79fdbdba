//! Caching layer for route responses.
//!
//! The same start/end pair is typically planned several times while the
//! user adjusts the interval and corridor sliders, and the base route does
//! not depend on either. Caching it saves a routing round trip per slider
//! move.
//!
//! Keys are the waypoint coordinates quantized to 1e-6 degrees (~0.1 m) so
//! that floating-point noise from geocoding does not defeat the cache.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Coordinate, RoutePolyline};

use super::RouteProvider;
use super::error::RoutingError;

/// Quantization factor for cache keys.
const KEY_SCALE: f64 = 1e6;

/// Cache key: quantized (lat, lon) pairs in request order.
type RouteKey = Vec<(i64, i64)>;

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct RouteCacheConfig {
    /// TTL for cached routes.
    pub ttl: Duration,

    /// Maximum number of cached routes.
    pub max_capacity: u64,
}

impl Default for RouteCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 500,
        }
    }
}

fn route_key(waypoints: &[Coordinate]) -> RouteKey {
    waypoints
        .iter()
        .map(|c| {
            (
                (c.lat() * KEY_SCALE).round() as i64,
                (c.lon() * KEY_SCALE).round() as i64,
            )
        })
        .collect()
}

/// Route provider with caching.
///
/// Wraps any `RouteProvider` and caches successful, non-empty polylines.
/// Failures always go back to the inner provider on the next request.
pub struct CachedRouter<R> {
    inner: R,
    cache: MokaCache<RouteKey, Arc<RoutePolyline>>,
}

impl<R: RouteProvider> CachedRouter<R> {
    /// Create a new cached router.
    pub fn new(inner: R, config: &RouteCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cache }
    }

    /// Invalidate all cached routes.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl<R: RouteProvider + Sync> RouteProvider for CachedRouter<R> {
    async fn fetch_route(&self, waypoints: &[Coordinate]) -> Result<RoutePolyline, RoutingError> {
        let key = route_key(waypoints);

        if let Some(cached) = self.cache.get(&key).await {
            trace!(waypoints = waypoints.len(), "route cache hit");
            return Ok(cached.as_ref().clone());
        }

        let polyline = self.inner.fetch_route(waypoints).await?;

        if !polyline.is_empty() {
            self.cache.insert(key, Arc::new(polyline.clone())).await;
        }

        Ok(polyline)
    }
}
