//! HTTP-level error types.
//!
//! - [`HttpStatusError`]: the response status was outside 200–299
//! - [`InvalidResponseError`]: the transport returned something that is not an
//!   HTTP response
//! - [`InvalidHttpRequestError`]: the request failed validation before sending
//! - [`TransportError`]: the transport itself failed
//! - [`HttpError`]: unified error covering all of the above plus authorization
//!
//! # Example
//!
//! ```rust,ignore
//! use declarative_rest::HttpError;
//!
//! match client.request(plan).await {
//!     Ok(response) => println!("{} bytes", response.body.len()),
//!     Err(HttpError::Status(e)) => println!("status {}", e.code),
//!     Err(e) => println!("request failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::auth::AuthorizationError;

/// Error returned when a response status is outside the 200–299 range.
///
/// ```rust
/// use declarative_rest::clients::HttpStatusError;
///
/// let error = HttpStatusError {
///     code: 404,
///     body: r#"{"error":"Not found"}"#.to_string(),
///     error_reference: Some("abc-123".to_string()),
/// };
/// assert!(error.to_string().contains("404"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("HTTP status {code} is outside the success range 200-299")]
pub struct HttpStatusError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body, decoded lossily as UTF-8.
    pub body: String,
    /// Reference ID for error reporting (from the `X-Request-Id` header).
    pub error_reference: Option<String>,
}

/// Error returned when the transport produced a response that is not HTTP-shaped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid response: {reason}")]
pub struct InvalidResponseError {
    /// What was wrong with the response.
    pub reason: String,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The resolved path plus query could not be turned into a URL.
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// The resolved path that failed to parse.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Error raised by a [`Transport`](crate::clients::Transport) implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or connection error from `reqwest`.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Any other transport failure, typically from custom transports.
    #[error("Transport failure: {message}")]
    Failed {
        /// What went wrong.
        message: String,
    },
}

/// Unified error type for request execution.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Non-2xx response.
    #[error(transparent)]
    Status(#[from] HttpStatusError),

    /// The transport returned a response that is not HTTP-shaped.
    #[error(transparent)]
    InvalidResponse(#[from] InvalidResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The authorization provider failed.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    /// The transport failed to deliver the request.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl HttpError {
    /// Returns the HTTP status code when the error came from a response.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(e) => Some(e.code),
            _ => None,
        }
    }
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};
