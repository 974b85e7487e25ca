//! The request executor.
//!
//! [`HttpClient`] turns a [`RequestPlan`] into a [`RequestEnvelope`] by merging
//! headers and query parameters in a fixed order, then sends the envelope
//! through its [`Transport`] and validates the response status.
//!
//! # Merge Order
//!
//! Headers: directive static headers, then client default headers, then
//! per-call headers, then the authorization header if the provider yields one.
//! Query parameters follow the same order without the authorization step.
//! Repeated keys are kept; nothing is deduplicated.

use std::fmt;
use std::sync::Arc;

use crate::auth::AuthorizationProvider;
use crate::clients::errors::{HttpError, HttpStatusError, InvalidResponseError, TransportError};
use crate::clients::http_request::{RequestEnvelope, RequestPlan};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{ReqwestTransport, Transport, TransportRequest};
use crate::config::{KeyValue, RequestConfig};

/// Concatenates key/value lists in the order given, keeping duplicates.
///
/// # Example
///
/// ```rust
/// use declarative_rest::KeyValue;
/// use declarative_rest::clients::merge_key_values;
///
/// let a = [KeyValue::new("A", "1")];
/// let b = [KeyValue::new("B", "2")];
/// let c = [KeyValue::new("A", "3")];
///
/// let merged = merge_key_values(&[&a[..], &b[..], &c[..]]);
/// let keys: Vec<&str> = merged.iter().map(KeyValue::key).collect();
/// assert_eq!(keys, vec!["A", "B", "A"]);
/// ```
#[must_use]
pub fn merge_key_values(sources: &[&[KeyValue]]) -> Vec<KeyValue> {
    sources.iter().flat_map(|source| source.iter().cloned()).collect()
}

/// Executes requests for generated resource methods.
///
/// The client is cheap to clone and safe to share across tasks. It holds no
/// per-request state.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    config: RequestConfig,
    authorization: Option<Arc<dyn AuthorizationProvider>>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_authorization", &self.authorization.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a client using [`ReqwestTransport`] and no authorization.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the `reqwest` client cannot be built.
    pub fn new(config: RequestConfig) -> Result<Self, TransportError> {
        Self::builder().config(config).build()
    }

    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Returns the request defaults.
    #[must_use]
    pub const fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// Merges the plan with client defaults and the authorization header.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Authorization`] if the provider fails.
    pub async fn assemble(&self, plan: RequestPlan) -> Result<RequestEnvelope, HttpError> {
        let mut headers = merge_key_values(&[
            plan.static_headers.as_slice(),
            self.config.default_headers(),
            plan.overrides.headers.as_slice(),
        ]);
        let query = merge_key_values(&[
            plan.static_query_params.as_slice(),
            self.config.default_query_params(),
            plan.overrides.query_params.as_slice(),
        ]);

        if let Some(provider) = &self.authorization {
            if let Some(header) = provider.authorization_header().await? {
                headers.push(header);
            }
        }

        Ok(RequestEnvelope {
            method: plan.method,
            path: plan.path,
            headers,
            query,
            body: plan.body,
        })
    }

    /// Sends an envelope and validates the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - the envelope fails validation or its URL does not parse (`InvalidRequest`)
    /// - the transport fails (`Transport`)
    /// - the response carries no valid HTTP status (`InvalidResponse`)
    /// - the status is outside 200–299 (`Status`)
    pub async fn execute(&self, envelope: RequestEnvelope) -> Result<HttpResponse, HttpError> {
        envelope.verify()?;
        let url = envelope.full_url()?;

        tracing::debug!(
            method = %envelope.method,
            url = %url,
            headers = envelope.headers.len(),
            has_body = envelope.body.is_some(),
            "dispatching request"
        );

        let response = self
            .transport
            .send(TransportRequest {
                method: envelope.method,
                url,
                headers: envelope.headers,
                body: envelope.body,
            })
            .await?;

        Self::validate(&envelope.path, response)
    }

    /// Assembles and executes a plan.
    ///
    /// # Errors
    ///
    /// See [`assemble`](Self::assemble) and [`execute`](Self::execute).
    pub async fn request(&self, plan: RequestPlan) -> Result<HttpResponse, HttpError> {
        let envelope = self.assemble(plan).await?;
        self.execute(envelope).await
    }

    fn validate(path: &str, response: HttpResponse) -> Result<HttpResponse, HttpError> {
        let Some(code) = response.status else {
            return Err(InvalidResponseError {
                reason: "transport returned a response without an HTTP status".to_string(),
            }
            .into());
        };

        if !response.is_ok() {
            tracing::warn!(status = code, path, "request failed with non-success status");
            return Err(HttpStatusError {
                code,
                body: response.body_text(),
                error_reference: response.request_id().map(String::from),
            }
            .into());
        }

        Ok(response)
    }
}

/// Builder for [`HttpClient`].
#[derive(Default)]
pub struct HttpClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    config: RequestConfig,
    authorization: Option<Arc<dyn AuthorizationProvider>>,
}

impl fmt::Debug for HttpClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClientBuilder")
            .field("has_transport", &self.transport.is_some())
            .field("config", &self.config)
            .field("has_authorization", &self.authorization.is_some())
            .finish()
    }
}

impl HttpClientBuilder {
    /// Sets the request defaults.
    #[must_use]
    pub fn config(mut self, config: RequestConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the transport. Defaults to [`ReqwestTransport`].
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Sets an already shared transport.
    #[must_use]
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the authorization provider.
    #[must_use]
    pub fn authorization(mut self, provider: impl AuthorizationProvider + 'static) -> Self {
        self.authorization = Some(Arc::new(provider));
        self
    }

    /// Builds the [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no transport was set and the default
    /// [`ReqwestTransport`] cannot be built.
    pub fn build(self) -> Result<HttpClient, TransportError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        Ok(HttpClient {
            transport,
            config: self.config,
            authorization: self.authorization,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthorizationError, StaticAuthorization};
    use crate::clients::http_request::{HttpMethod, RequestOverrides};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FixedTransport {
        response: HttpResponse,
        sent: Mutex<Vec<TransportRequest>>,
    }

    impl FixedTransport {
        fn new(response: HttpResponse) -> Arc<Self> {
            Arc::new(Self {
                response,
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn send(&self, request: TransportRequest) -> Result<HttpResponse, TransportError> {
            self.sent.lock().unwrap().push(request);
            Ok(self.response.clone())
        }
    }

    struct FailingAuthorization;

    #[async_trait]
    impl AuthorizationProvider for FailingAuthorization {
        async fn authorization_header(&self) -> Result<Option<KeyValue>, AuthorizationError> {
            Err(AuthorizationError::new("keychain locked"))
        }
    }

    struct NoAuthorization;

    #[async_trait]
    impl AuthorizationProvider for NoAuthorization {
        async fn authorization_header(&self) -> Result<Option<KeyValue>, AuthorizationError> {
            Ok(None)
        }
    }

    fn plan(method: HttpMethod) -> RequestPlan {
        RequestPlan {
            method,
            path: "https://api.example.com/posts".to_string(),
            static_headers: vec![KeyValue::new("A", "static")],
            static_query_params: vec![KeyValue::new("qa", "static")],
            overrides: RequestOverrides::new()
                .header("C", "dynamic")
                .query_param("qc", "dynamic"),
            body: None,
        }
    }

    fn client_with(transport: Arc<FixedTransport>) -> HttpClientBuilder {
        HttpClient::builder()
            .shared_transport(transport)
            .config(
                RequestConfig::builder()
                    .default_header(("B", "default"))
                    .default_query_param(("qb", "default"))
                    .build(),
            )
    }

    fn keys(list: &[KeyValue]) -> Vec<&str> {
        list.iter().map(KeyValue::key).collect()
    }

    #[test]
    fn test_merge_key_values_keeps_duplicates() {
        let first = vec![KeyValue::new("X", "1")];
        let second = vec![KeyValue::new("X", "2")];
        let merged = merge_key_values(&[first.as_slice(), &[], second.as_slice()]);
        assert_eq!(merged, vec![KeyValue::new("X", "1"), KeyValue::new("X", "2")]);
    }

    #[test]
    fn test_assemble_merge_order_without_authorization() {
        let transport = FixedTransport::new(HttpResponse::new(200, HashMap::new(), Vec::new()));
        let client = client_with(transport).build().unwrap();

        let envelope = tokio_test::block_on(client.assemble(plan(HttpMethod::Get))).unwrap();
        assert_eq!(keys(&envelope.headers), vec!["A", "B", "C"]);
        assert_eq!(keys(&envelope.query), vec!["qa", "qb", "qc"]);
    }

    #[test]
    fn test_assemble_appends_authorization_last() {
        let transport = FixedTransport::new(HttpResponse::new(200, HashMap::new(), Vec::new()));
        let client = client_with(transport)
            .authorization(StaticAuthorization::bearer("tok"))
            .build()
            .unwrap();

        let envelope = tokio_test::block_on(client.assemble(plan(HttpMethod::Get))).unwrap();
        assert_eq!(keys(&envelope.headers), vec!["A", "B", "C", "Authorization"]);
        assert_eq!(keys(&envelope.query), vec!["qa", "qb", "qc"]);
    }

    #[test]
    fn test_assemble_skips_absent_authorization() {
        let transport = FixedTransport::new(HttpResponse::new(200, HashMap::new(), Vec::new()));
        let client = client_with(transport)
            .authorization(NoAuthorization)
            .build()
            .unwrap();

        let envelope = tokio_test::block_on(client.assemble(plan(HttpMethod::Get))).unwrap();
        assert_eq!(keys(&envelope.headers), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_authorization_failure_aborts_request() {
        let transport = FixedTransport::new(HttpResponse::new(200, HashMap::new(), Vec::new()));
        let client = client_with(transport.clone())
            .authorization(FailingAuthorization)
            .build()
            .unwrap();

        let result = tokio_test::block_on(client.request(plan(HttpMethod::Get)));
        assert!(matches!(result, Err(HttpError::Authorization(_))));
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_execute_sends_full_url() {
        let transport = FixedTransport::new(HttpResponse::new(204, HashMap::new(), Vec::new()));
        let client = client_with(transport.clone()).build().unwrap();

        tokio_test::block_on(client.request(plan(HttpMethod::Get))).unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].url.as_str(),
            "https://api.example.com/posts?qa=static&qb=default&qc=dynamic"
        );
        assert_eq!(sent[0].method, HttpMethod::Get);
    }

    #[test]
    fn test_non_success_status_is_error_with_reference() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["req-9".to_string()]);
        let transport = FixedTransport::new(HttpResponse::new(404, headers, b"missing".to_vec()));
        let client = client_with(transport).build().unwrap();

        let result = tokio_test::block_on(client.request(plan(HttpMethod::Get)));
        match result {
            Err(HttpError::Status(e)) => {
                assert_eq!(e.code, 404);
                assert_eq!(e.body, "missing");
                assert_eq!(e.error_reference.as_deref(), Some("req-9"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn test_status_boundaries() {
        for (code, ok) in [(199, false), (200, true), (299, true), (300, false)] {
            let transport =
                FixedTransport::new(HttpResponse::new(code, HashMap::new(), Vec::new()));
            let client = client_with(transport).build().unwrap();
            let result = tokio_test::block_on(client.request(plan(HttpMethod::Get)));
            assert_eq!(result.is_ok(), ok, "status {code}");
        }
    }

    #[test]
    fn test_non_http_response_is_invalid() {
        let transport = FixedTransport::new(HttpResponse::non_http(b"{}".to_vec()));
        let client = client_with(transport).build().unwrap();

        let result = tokio_test::block_on(client.request(plan(HttpMethod::Get)));
        assert!(matches!(result, Err(HttpError::InvalidResponse(_))));
    }

    #[test]
    fn test_unregistered_status_keeps_its_code() {
        for code in [600, 999] {
            let transport =
                FixedTransport::new(HttpResponse::new(code, HashMap::new(), Vec::new()));
            let client = client_with(transport).build().unwrap();

            let error = tokio_test::block_on(client.request(plan(HttpMethod::Get))).unwrap_err();
            assert_eq!(error.status_code(), Some(code));
            assert!(matches!(error, HttpError::Status(ref e) if e.code == code));
        }
    }

    struct BrokenTransport;

    #[async_trait]
    impl Transport for BrokenTransport {
        async fn send(&self, _request: TransportRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError::Failed {
                message: "connection reset".to_string(),
            })
        }
    }

    #[test]
    fn test_transport_failure_is_reported() {
        let client = HttpClient::builder()
            .transport(BrokenTransport)
            .build()
            .unwrap();

        let result = tokio_test::block_on(client.request(plan(HttpMethod::Get)));
        match result {
            Err(HttpError::Transport(TransportError::Failed { message })) => {
                assert_eq!(message, "connection reset");
            }
            other => panic!("expected transport failure, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_hides_header_values() {
        let transport = FixedTransport::new(HttpResponse::new(200, HashMap::new(), Vec::new()));
        let client = HttpClient::builder()
            .shared_transport(transport)
            .config(
                RequestConfig::builder()
                    .default_header(("Authorization", "Bearer sk-live-123"))
                    .build(),
            )
            .build()
            .unwrap();

        let debug = format!("{client:?}");
        assert!(debug.contains("Authorization"));
        assert!(!debug.contains("sk-live-123"));
    }

    #[test]
    fn test_post_without_body_is_rejected_before_sending() {
        let transport = FixedTransport::new(HttpResponse::new(200, HashMap::new(), Vec::new()));
        let client = client_with(transport.clone()).build().unwrap();

        let result = tokio_test::block_on(client.request(plan(HttpMethod::Post)));
        assert!(matches!(result, Err(HttpError::InvalidRequest(_))));
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
