//! Request types: what a generated method hands to the client, and what the
//! client sends.
//!
//! - [`RequestOverrides`]: per-call dynamic headers and query parameters
//! - [`RequestPlan`]: a request before the client merges its defaults in
//! - [`RequestEnvelope`]: the fully merged request for a single call

use std::fmt;

use url::Url;

use crate::clients::errors::InvalidHttpRequestError;
use crate::config::KeyValue;

/// HTTP methods used by generated resource methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call headers and query parameters.
///
/// These are merged after the directive's static values and the client's
/// defaults.
///
/// # Example
///
/// ```rust
/// use declarative_rest::RequestOverrides;
///
/// let overrides = RequestOverrides::new()
///     .header("X-Request-Source", "sync")
///     .query_param("page", "2");
/// assert_eq!(overrides.headers.len(), 1);
/// assert_eq!(overrides.query_params[0].value(), "2");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOverrides {
    /// Dynamic headers for this call.
    pub headers: Vec<KeyValue>,
    /// Dynamic query parameters for this call.
    pub query_params: Vec<KeyValue>,
}

impl RequestOverrides {
    /// Creates empty overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(KeyValue::new(key, value));
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push(KeyValue::new(key, value));
        self
    }
}

/// A request as prepared by a generated method, before client defaults and
/// authorization are merged in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestPlan {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The template-resolved absolute URL, without client query parameters.
    pub path: String,
    /// Headers declared on the directive.
    pub static_headers: Vec<KeyValue>,
    /// Query parameters declared on the directive.
    pub static_query_params: Vec<KeyValue>,
    /// Per-call headers and query parameters.
    pub overrides: RequestOverrides,
    /// Serialized JSON body, if any.
    pub body: Option<Vec<u8>>,
}

/// The fully merged request for a single call.
///
/// # Example
///
/// ```rust
/// use declarative_rest::clients::{HttpMethod, RequestEnvelope};
///
/// let envelope = RequestEnvelope::builder(HttpMethod::Get, "https://api.example.com/posts")
///     .query_param("page", "1")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     envelope.full_url().unwrap().as_str(),
///     "https://api.example.com/posts?page=1"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestEnvelope {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The template-resolved absolute URL.
    pub path: String,
    /// Merged headers, in transmission order.
    pub headers: Vec<KeyValue>,
    /// Merged query parameters, in serialization order.
    pub query: Vec<KeyValue>,
    /// Serialized JSON body, if any.
    pub body: Option<Vec<u8>>,
}

impl RequestEnvelope {
    /// Creates a new builder.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> RequestEnvelopeBuilder {
        RequestEnvelopeBuilder::new(method, path)
    }

    /// Validates the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingBody`] for a POST or PUT
    /// without a body.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if matches!(self.method, HttpMethod::Post | HttpMethod::Put) && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.method.to_string(),
            });
        }
        Ok(())
    }

    /// Builds the URL to send: the resolved path followed by the query items.
    ///
    /// Query items are appended to any query already present in the path and
    /// are only attached when there is at least one.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidUrl`] if the resolved path is
    /// not an absolute URL (for example after substituting an argument that
    /// breaks the authority).
    pub fn full_url(&self) -> Result<Url, InvalidHttpRequestError> {
        let mut url = Url::parse(&self.path).map_err(|e| InvalidHttpRequestError::InvalidUrl {
            url: self.path.clone(),
            reason: e.to_string(),
        })?;

        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|kv| (kv.key(), kv.value())));
        }

        Ok(url)
    }
}

/// Builder for [`RequestEnvelope`].
#[derive(Debug)]
pub struct RequestEnvelopeBuilder {
    method: HttpMethod,
    path: String,
    headers: Vec<KeyValue>,
    query: Vec<KeyValue>,
    body: Option<Vec<u8>>,
}

impl RequestEnvelopeBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(KeyValue::new(key, value));
        self
    }

    /// Replaces all headers.
    #[must_use]
    pub fn headers(mut self, headers: Vec<KeyValue>) -> Self {
        self.headers = headers;
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push(KeyValue::new(key, value));
        self
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn query(mut self, query: Vec<KeyValue>) -> Self {
        self.query = query;
        self
    }

    /// Sets the body bytes.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Builds the [`RequestEnvelope`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the envelope fails validation.
    pub fn build(self) -> Result<RequestEnvelope, InvalidHttpRequestError> {
        let envelope = RequestEnvelope {
            method: self.method,
            path: self.path,
            headers: self.headers,
            query: self.query,
            body: self.body,
        };
        envelope.verify()?;
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_verify_requires_body_for_post_and_put() {
        for method in [HttpMethod::Post, HttpMethod::Put] {
            let result = RequestEnvelope::builder(method, "https://api.example.com/posts").build();
            assert!(matches!(
                result,
                Err(InvalidHttpRequestError::MissingBody { .. })
            ));
        }
    }

    #[test]
    fn test_delete_without_body_is_valid() {
        let envelope = RequestEnvelope::builder(HttpMethod::Delete, "https://api.example.com/posts/1")
            .build()
            .unwrap();
        assert!(envelope.body.is_none());
    }

    #[test]
    fn test_full_url_without_query_is_unchanged() {
        let envelope = RequestEnvelope::builder(HttpMethod::Get, "https://api.example.com/posts/12")
            .build()
            .unwrap();
        let url = envelope.full_url().unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/posts/12");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_full_url_keeps_query_order_and_duplicates() {
        let envelope = RequestEnvelope::builder(HttpMethod::Get, "https://api.example.com/posts")
            .query_param("tag", "a")
            .query_param("tag", "b")
            .query_param("q", "hello world")
            .build()
            .unwrap();
        let url = envelope.full_url().unwrap();
        assert_eq!(url.query(), Some("tag=a&tag=b&q=hello+world"));
    }

    #[test]
    fn test_full_url_appends_to_existing_query() {
        let envelope =
            RequestEnvelope::builder(HttpMethod::Get, "https://api.example.com/posts?sort=asc")
                .query_param("page", "2")
                .build()
                .unwrap();
        let url = envelope.full_url().unwrap();
        assert_eq!(url.query(), Some("sort=asc&page=2"));
    }

    #[test]
    fn test_full_url_rejects_relative_path() {
        let envelope = RequestEnvelope::builder(HttpMethod::Get, "/posts/12")
            .build()
            .unwrap();
        assert!(matches!(
            envelope.full_url(),
            Err(InvalidHttpRequestError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_overrides_builder() {
        let overrides = RequestOverrides::new()
            .header("A", "1")
            .header("A", "2")
            .query_param("q", "x");
        assert_eq!(overrides.headers.len(), 2);
        assert_eq!(overrides.query_params, vec![KeyValue::new("q", "x")]);
    }
}
