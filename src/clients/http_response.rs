//! The response type returned by transports.

use std::collections::HashMap;

/// A response as returned by a [`Transport`](crate::clients::Transport).
///
/// `status` is `None` when the transport produced something that is not an
/// HTTP response; the client rejects such responses with
/// [`InvalidResponseError`](crate::clients::InvalidResponseError).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code, if the response was HTTP-shaped.
    pub status: Option<u16>,
    /// Response headers keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates an HTTP response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, Vec<String>>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: Some(status),
            headers,
            body: body.into(),
        }
    }

    /// Creates a response that carries no HTTP status.
    #[must_use]
    pub fn non_http(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: None,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.status, Some(200..=299))
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the body decoded lossily as UTF-8.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
