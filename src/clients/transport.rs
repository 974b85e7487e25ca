//! The transport seam and its `reqwest` implementation.
//!
//! A [`Transport`] sends one fully built request and hands back the raw
//! response. It performs no status validation, no retries and imposes no
//! timeout of its own; those concerns belong to the caller or to the
//! underlying HTTP stack.

use std::collections::HashMap;

use async_trait::async_trait;
use url::Url;

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpMethod;
use crate::clients::http_response::HttpResponse;
use crate::config::KeyValue;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A request ready to be put on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The full URL including query string.
    pub url: Url,
    /// Headers in transmission order; repeated keys are sent repeatedly.
    pub headers: Vec<KeyValue>,
    /// The body bytes, if any.
    pub body: Option<Vec<u8>>,
}

/// Sends HTTP requests.
///
/// Implementations must be safe to share between concurrent calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the request could not be delivered.
    async fn send(&self, request: TransportRequest) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport using rustls and this crate's user agent.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the client cannot be built
    /// (e.g., TLS initialization failure).
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(format!("declarative-rest v{SDK_VERSION}"))
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest::Client`.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    const fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<HttpResponse, TransportError> {
        let mut req_builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url);

        // `header` appends, so repeated keys are all transmitted
        for header in &request.headers {
            req_builder = req_builder.header(header.key(), header.value());
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?;

        Ok(HttpResponse::new(code, headers, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_builds() {
        assert!(ReqwestTransport::new().is_ok());
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Get),
            reqwest::Method::GET
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Delete),
            reqwest::Method::DELETE
        );
    }

    #[test]
    fn test_parse_response_headers_lowercases_and_groups() {
        let mut map = reqwest::header::HeaderMap::new();
        map.append("X-Request-Id", "abc".parse().unwrap());
        map.append("Set-Cookie", "a=1".parse().unwrap());
        map.append("Set-Cookie", "b=2".parse().unwrap());

        let parsed = ReqwestTransport::parse_response_headers(&map);
        assert_eq!(parsed.get("x-request-id"), Some(&vec!["abc".to_string()]));
        assert_eq!(parsed.get("set-cookie").map(Vec::len), Some(2));
    }
}
