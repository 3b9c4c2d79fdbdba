//! Routing client error types.

/// Errors from fetching a route.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed (connection refused, DNS, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The routing service did not answer within the configured timeout
    #[error("routing service timed out")]
    Timeout,

    /// Routing service returned an error status code
    #[error("routing API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response was successful but contained no usable route
    #[error("routing service returned no routes")]
    NoRoutes,

    /// Response body could not be decoded
    #[error("routing response parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// A route needs at least a start and an end
    #[error("at least 2 waypoints are required, got {0}")]
    TooFewWaypoints(usize),
}

impl RoutingError {
    /// Returns true if the failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RoutingError::Timeout)
    }
}

impl From<reqwest::Error> for RoutingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RoutingError::Timeout
        } else {
            RoutingError::Http(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RoutingError::NoRoutes;
        assert_eq!(err.to_string(), "routing service returned no routes");

        let err = RoutingError::Api {
            status: 502,
            message: "Bad Gateway".into(),
        };
        assert_eq!(err.to_string(), "routing API error 502: Bad Gateway");

        let err = RoutingError::TooFewWaypoints(1);
        assert_eq!(err.to_string(), "at least 2 waypoints are required, got 1");

        let err = RoutingError::Json {
            message: "missing field `routes`".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn timeout_is_distinct() {
        assert!(RoutingError::Timeout.is_timeout());
        assert!(!RoutingError::NoRoutes.is_timeout());
    }
}
