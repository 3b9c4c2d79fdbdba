//! Planning parameters.

use super::error::PlanError;

/// Which polyline a finished plan carries for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolylinePolicy {
    /// Re-request the route through every selected waypoint, so the
    /// displayed path actually visits the stations.
    #[default]
    Refetch,

    /// Keep the original start-end polyline.
    ReuseBase,
}

/// Configuration parameters for building a route plan.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// Target spacing between inserted stations (km).
    pub interval_km: f64,

    /// Maximum detour cost for a station to be considered (km).
    pub corridor_km: f64,

    /// Polyline returned with the plan.
    pub polyline: PolylinePolicy,

    /// Per-axis tolerance used when labelling polyline points (degrees).
    pub classify_tolerance_deg: f64,
}

impl PlanConfig {
    /// Create a configuration with the given interval and corridor and
    /// default policy and tolerance.
    pub fn new(interval_km: f64, corridor_km: f64) -> Self {
        Self {
            interval_km,
            corridor_km,
            ..Self::default()
        }
    }

    /// Set the polyline policy.
    pub fn with_polyline(mut self, policy: PolylinePolicy) -> Self {
        self.polyline = policy;
        self
    }

    /// Set the classification tolerance.
    pub fn with_classify_tolerance(mut self, tolerance_deg: f64) -> Self {
        self.classify_tolerance_deg = tolerance_deg;
        self
    }

    /// Check the numeric parameters.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.interval_km.is_finite() || self.interval_km <= 0.0 {
            return Err(PlanError::InvalidRequest(format!(
                "interval_km must be a positive number, got {}",
                self.interval_km
            )));
        }

        if !self.corridor_km.is_finite() || self.corridor_km < 0.0 {
            return Err(PlanError::InvalidRequest(format!(
                "corridor_km must be zero or positive, got {}",
                self.corridor_km
            )));
        }

        if !self.classify_tolerance_deg.is_finite() || self.classify_tolerance_deg < 0.0 {
            return Err(PlanError::InvalidRequest(format!(
                "classify tolerance must be zero or positive, got {}",
                self.classify_tolerance_deg
            )));
        }

        Ok(())
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            interval_km: 250.0,
            corridor_km: 100.0,
            polyline: PolylinePolicy::Refetch,
            classify_tolerance_deg: 0.01, // ~1 km
        }
    }
}
