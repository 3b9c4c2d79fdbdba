//! Nominatim geocoding client.
//!
//! The public instance allows at most one request per second, so the client
//! serializes its requests and spaces them by `min_interval`. Successful
//! lookups are cached by lowercased query.

use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache as MokaCache;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::domain::Coordinate;

use super::Geocoder;
use super::error::GeocodeError;

/// Default base URL: the public OpenStreetMap Nominatim instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying user agent.
const USER_AGENT: &str = concat!("route-server/", env!("CARGO_PKG_VERSION"));

/// A single search hit. Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
pub struct PlaceDto {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl PlaceDto {
    fn coordinate(&self) -> Result<Coordinate, GeocodeError> {
        let parse = |s: &str| {
            s.parse::<f64>().map_err(|e| GeocodeError::Json {
                message: format!("invalid coordinate {s:?}: {e}"),
            })
        };
        Coordinate::new(parse(&self.lat)?, parse(&self.lon)?).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })
    }
}

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Minimum spacing between requests
    pub min_interval: Duration,
    /// TTL for cached lookups
    pub cache_ttl: Duration,
    /// Maximum number of cached lookups
    pub cache_capacity: u64,
}

impl NominatimConfig {
    /// Create a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            min_interval: Duration::from_secs(1),
            cache_ttl: Duration::from_secs(24 * 60 * 60),
            cache_capacity: 1000,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the minimum spacing between requests.
    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Client for the Nominatim search API.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
    min_interval: Duration,
    cache: MokaCache<String, Coordinate>,
    /// Held for the whole upstream request; stores when the last one was sent
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimClient {
    /// Create a new Nominatim client.
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        let cache = MokaCache::builder()
            .time_to_live(config.cache_ttl)
            .max_capacity(config.cache_capacity)
            .build();

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            min_interval: config.min_interval,
            cache,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Query the search endpoint for the best match.
    async fn search(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let places: Vec<PlaceDto> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        let place = places.first().ok_or_else(|| GeocodeError::NotFound {
            query: query.to_string(),
        })?;
        debug!(query, place = ?place.display_name, "geocoded address");

        place.coordinate()
    }
}

impl Geocoder for NominatimClient {
    async fn geocode(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let key = query.to_lowercase();
        if let Some(coordinate) = self.cache.get(&key).await {
            trace!(query, "geocode cache hit");
            return Ok(coordinate);
        }

        let mut last = self.last_request.lock().await;

        // Resolved by a concurrent request while this one waited for the lock
        if let Some(coordinate) = self.cache.get(&key).await {
            trace!(query, "geocode cache hit");
            return Ok(coordinate);
        }

        if let Some(sent) = *last {
            let wait = self.min_interval.saturating_sub(sent.elapsed());
            if !wait.is_zero() {
                debug!(?wait, "rate limiting geocoding request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());

        let coordinate = self.search(query).await?;
        self.cache.insert(key, coordinate).await;
        Ok(coordinate)
    }
}
