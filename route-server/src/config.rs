//! Server configuration from environment variables.
//!
//! | Variable                 | Default                              |
//! |--------------------------|--------------------------------------|
//! | `ROUTE_PLANNER_ADDR`     | `127.0.0.1:3000`                     |
//! | `OSRM_BASE_URL`          | `https://router.project-osrm.org`    |
//! | `NOMINATIM_BASE_URL`     | `https://nominatim.openstreetmap.org`|
//! | `STATION_CATALOG`        | `data/stations.json`                 |
//! | `ROUTE_LOG_PATH`         | `route_log.jsonl` (empty disables)   |
//! | `ROUTING_TIMEOUT_SECS`   | `30`                                 |
//! | `GEOCODING_TIMEOUT_SECS` | `30`                                 |
//! | `ROUTE_PLANNER_FIXTURES` | unset (`1` or `true` for offline)    |
//! | `DEFAULT_INTERVAL_KM`    | `250`                                |
//! | `DEFAULT_CORRIDOR_KM`    | `100`                                |
//! | `CLASSIFY_TOLERANCE_DEG` | `0.01`                               |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::geocode;
use crate::planner::PlanConfig;
use crate::routing;

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub osrm_base_url: String,
    pub nominatim_base_url: String,
    pub catalog_path: PathBuf,
    /// `None` disables the route log
    pub route_log_path: Option<PathBuf>,
    pub routing_timeout: Duration,
    pub geocoding_timeout: Duration,
    /// Use the offline router and geocoder instead of the live services
    pub use_fixtures: bool,
    pub plan: PlanConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default =
            |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let addr = parse(&lookup, "ROUTE_PLANNER_ADDR", "127.0.0.1:3000")?;
        let routing_timeout = parse_timeout(&lookup, "ROUTING_TIMEOUT_SECS")?;
        let geocoding_timeout = parse_timeout(&lookup, "GEOCODING_TIMEOUT_SECS")?;
        let interval_km: f64 = parse(&lookup, "DEFAULT_INTERVAL_KM", "250")?;
        let corridor_km: f64 = parse(&lookup, "DEFAULT_CORRIDOR_KM", "100")?;
        let tolerance: f64 = parse(&lookup, "CLASSIFY_TOLERANCE_DEG", "0.01")?;

        let use_fixtures = match lookup("ROUTE_PLANNER_FIXTURES") {
            None => false,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "" | "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "ROUTE_PLANNER_FIXTURES",
                        value,
                        reason: "expected true or false".to_string(),
                    });
                }
            },
        };

        let route_log_path = match lookup("ROUTE_LOG_PATH") {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => Some(PathBuf::from("route_log.jsonl")),
        };

        let plan = PlanConfig::new(interval_km, corridor_km).with_classify_tolerance(tolerance);
        plan.validate().map_err(|e| ConfigError::Invalid {
            name: "DEFAULT_INTERVAL_KM/DEFAULT_CORRIDOR_KM/CLASSIFY_TOLERANCE_DEG",
            value: format!("{interval_km}/{corridor_km}/{tolerance}"),
            reason: e.to_string(),
        })?;

        Ok(Self {
            addr,
            osrm_base_url: or_default("OSRM_BASE_URL", routing::DEFAULT_BASE_URL),
            nominatim_base_url: or_default("NOMINATIM_BASE_URL", geocode::DEFAULT_BASE_URL),
            catalog_path: PathBuf::from(or_default("STATION_CATALOG", "data/stations.json")),
            route_log_path,
            routing_timeout,
            geocoding_timeout,
            use_fixtures,
            plan,
        })
    }
}

/// Parse a variable, falling back to `default` when unset.
fn parse<T, F>(lookup: &F, name: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).unwrap_or_else(|| default.to_string());
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: e.to_string(),
        value,
    })
}

/// Parse a timeout in whole seconds, defaulting to 30. Zero is rejected.
fn parse_timeout<F>(lookup: &F, name: &'static str) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs: u64 = parse(lookup, name, "30")?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            name,
            value: secs.to_string(),
            reason: "must be at least 1 second".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
