//! MBTA client error types.

use super::convert::ExtractError;

/// Errors from the MBTA V3 API client.
#[derive(Debug, thiserror::Error)]
pub enum MbtaError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key or unauthorized
    #[error("unauthorized: check MBTA_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by the MBTA API")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        /// Truncated response body sample for diagnostics.
        body: Option<String>,
    },

    /// No route matched the configured display name
    #[error("route not found: {0}")]
    RouteNotFound(String),

    /// A well-formed document was missing required content
    #[error("malformed payload: {0}")]
    Malformed(#[from] ExtractError),
}
