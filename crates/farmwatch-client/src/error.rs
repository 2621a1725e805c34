//! Error types for the Farmwatch service client.

use thiserror::Error;

/// Errors that can occur when talking to the farm monitoring service.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error
/// variants in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The service is not reachable.
    #[error("Service not reachable at {url}: {source}")]
    Transport {
        /// The URL that was requested.
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP request failed after the service was reached.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The service answered with a status the operation does not accept.
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// The HTTP status code.
        status: u16,
        /// Error message extracted from the response body, or the status line.
        message: String,
    },

    /// The analysis job has not produced a result yet (404 while polling).
    #[error("Analysis result not ready yet")]
    NotReady,

    /// The response body did not match any shape the client understands.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

/// Result type alias for service client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
