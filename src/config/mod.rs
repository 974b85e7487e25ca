//! Request defaults shared by every generated method.
//!
//! [`RequestConfig`] replaces ambient/global configuration: it is an explicit
//! value handed to the [`HttpClient`](crate::clients::HttpClient), which merges
//! its default headers and query parameters into every request.
//!
//! # Example
//!
//! ```rust
//! use declarative_rest::{KeyValue, RequestConfig};
//!
//! let config = RequestConfig::builder()
//!     .default_header(KeyValue::content_type_json())
//!     .default_query_param(KeyValue::new("locale", "en-US"))
//!     .build();
//!
//! assert_eq!(config.default_headers().len(), 1);
//! assert_eq!(config.default_query_params()[0].key(), "locale");
//! ```

use std::fmt;

mod newtypes;

pub use newtypes::KeyValue;

/// Renders each pair as `key: *****` so secrets stay out of logs.
fn masked(list: &[KeyValue]) -> Vec<String> {
    list.iter().map(|kv| format!("{}: *****", kv.key())).collect()
}

/// Default headers and query parameters applied to every request.
///
/// `RequestConfig::default()` is empty. [`RequestConfig::json`] carries the
/// conventional `Content-Type: application/json` header.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestConfig {
    default_headers: Vec<KeyValue>,
    default_query_params: Vec<KeyValue>,
}

impl RequestConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> RequestConfigBuilder {
        RequestConfigBuilder::new()
    }

    /// A configuration whose only default is the JSON content type header.
    #[must_use]
    pub fn json() -> Self {
        Self::builder()
            .default_header(KeyValue::content_type_json())
            .build()
    }

    /// Headers merged after each directive's static headers.
    #[must_use]
    pub fn default_headers(&self) -> &[KeyValue] {
        &self.default_headers
    }

    /// Query parameters merged after each directive's static query parameters.
    #[must_use]
    pub fn default_query_params(&self) -> &[KeyValue] {
        &self.default_query_params
    }
}

impl fmt::Debug for RequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestConfig")
            .field("default_headers", &masked(&self.default_headers))
            .field("default_query_params", &masked(&self.default_query_params))
            .finish()
    }
}

// Verify RequestConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestConfig>();
};

/// Builder for [`RequestConfig`].
#[derive(Default)]
pub struct RequestConfigBuilder {
    default_headers: Vec<KeyValue>,
    default_query_params: Vec<KeyValue>,
}

impl fmt::Debug for RequestConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestConfigBuilder")
            .field("default_headers", &masked(&self.default_headers))
            .field("default_query_params", &masked(&self.default_query_params))
            .finish()
    }
}

impl RequestConfigBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a default header.
    #[must_use]
    pub fn default_header(mut self, header: impl Into<KeyValue>) -> Self {
        self.default_headers.push(header.into());
        self
    }

    /// Replaces all default headers.
    #[must_use]
    pub fn default_headers(mut self, headers: Vec<KeyValue>) -> Self {
        self.default_headers = headers;
        self
    }

    /// Appends a default query parameter.
    #[must_use]
    pub fn default_query_param(mut self, param: impl Into<KeyValue>) -> Self {
        self.default_query_params.push(param.into());
        self
    }

    /// Replaces all default query parameters.
    #[must_use]
    pub fn default_query_params(mut self, params: Vec<KeyValue>) -> Self {
        self.default_query_params = params;
        self
    }

    /// Builds the [`RequestConfig`].
    #[must_use]
    pub fn build(self) -> RequestConfig {
        RequestConfig {
            default_headers: self.default_headers,
            default_query_params: self.default_query_params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = RequestConfig::default();
        assert!(config.default_headers().is_empty());
        assert!(config.default_query_params().is_empty());
    }

    #[test]
    fn test_json_config_has_content_type() {
        let config = RequestConfig::json();
        assert_eq!(config.default_headers(), &[KeyValue::content_type_json()]);
        assert!(config.default_query_params().is_empty());
    }

    #[test]
    fn test_builder_preserves_order_and_duplicates() {
        let config = RequestConfig::builder()
            .default_header(("X-Trace", "1"))
            .default_header(("X-Trace", "2"))
            .build();

        let values: Vec<&str> = config.default_headers().iter().map(KeyValue::value).collect();
        assert_eq!(values, vec!["1", "2"]);
    }

    #[test]
    fn test_builder_replaces_lists() {
        let config = RequestConfig::builder()
            .default_query_param(("a", "1"))
            .default_query_params(vec![KeyValue::new("b", "2")])
            .build();

        assert_eq!(config.default_query_params(), &[KeyValue::new("b", "2")]);
    }

    #[test]
    fn test_debug_masks_values() {
        let builder = RequestConfig::builder()
            .default_header(("Authorization", "Bearer secret-token"))
            .default_query_param(("api_key", "secret-key"));
        let builder_debug = format!("{builder:?}");
        let config = builder.build();
        let debug = format!("{config:?}");

        assert!(debug.contains("Authorization: *****"));
        assert!(debug.contains("api_key: *****"));
        for output in [debug, builder_debug] {
            assert!(!output.contains("secret-token"));
            assert!(!output.contains("secret-key"));
        }
    }
}
