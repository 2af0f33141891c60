//! Errors that can occur when talking to a Strongroom server.

use reqwest::StatusCode;
use thiserror::Error;

/// An error returned while performing an API request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server returned an HTTP error response.
    #[error("API error {status}: {content}")]
    Response {
        /// HTTP status code of the response.
        status: StatusCode,
        /// Raw response body content.
        content: String,
    },

    /// Could not reach the server (DNS failure, timeout, TLS error, connection refused, etc.)
    #[error("not connected: {0}")]
    NotConnected(String),

    /// Catch-all for other errors (serialization, IO, etc.)
    #[error("other error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            // reqwest errors don't carry the response body, so the content stays
            // empty; the write path builds this variant itself when a body exists.
            return ApiError::Response {
                status,
                content: String::new(),
            };
        }

        // Connection errors, timeouts, and errors sending the request all
        // indicate a failure to communicate with the server.
        if e.is_connect() || e.is_timeout() || e.is_request() {
            return ApiError::NotConnected(e.to_string());
        }

        ApiError::Other(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Other(e.to_string())
    }
}

/// The client could not be constructed from the provided settings.
///
/// Nothing has been sent to the server when this is returned.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured server URL does not parse.
    #[error("invalid server URL {url:?}: {source}")]
    InvalidServerUrl {
        /// The URL as configured.
        url: String,
        /// The underlying parse failure.
        source: url::ParseError,
    },

    /// The underlying HTTP client failed to build.
    #[error("failed to build the HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
