//! Planning error types.

use crate::geocode::GeocodeError;
use crate::routing::RoutingError;

/// Terminal failures of a planning request.
///
/// An empty corridor is not among them: it is planned through with
/// "no station found" placeholders.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// An input address could not be resolved
    #[error("geocoding failed: {0}")]
    GeocodeFailure(#[from] GeocodeError),

    /// The routing service could not produce a route
    #[error("routing unavailable: {0}")]
    RoutingUnavailable(#[from] RoutingError),

    /// Request parameters are out of range
    #[error("invalid plan request: {0}")]
    InvalidRequest(String),
}

impl PlanError {
    /// Returns true if the routing service timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, PlanError::RoutingUnavailable(e) if e.is_timeout())
    }
}
