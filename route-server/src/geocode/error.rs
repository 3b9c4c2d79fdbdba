//! Geocoding error types.

/// Errors that can occur when resolving an address.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The lookup service has no match for the query
    #[error("address not found: {query}")]
    NotFound { query: String },

    /// The query was empty after trimming
    #[error("address is empty")]
    EmptyQuery,

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("geocoding API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON or its coordinates
    #[error("geocoding response parse error: {message}")]
    Json { message: String },
}
