//! The [`AuthorizationProvider`] trait and a static implementation.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::config::KeyValue;

/// Error returned when a provider cannot produce its header.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Authorization header unavailable: {message}")]
pub struct AuthorizationError {
    /// Why the header could not be produced.
    pub message: String,
}

impl AuthorizationError {
    /// Creates a new error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Supplies the authorization header appended to every request.
///
/// Implementations may refresh tokens or hit a keychain; the client awaits the
/// provider once per request and never caches the result.
#[async_trait]
pub trait AuthorizationProvider: Send + Sync {
    /// Returns the header to append, or `None` to send the request without one.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError`] when the header should exist but could
    /// not be produced. The request is not sent in that case.
    async fn authorization_header(&self) -> Result<Option<KeyValue>, AuthorizationError>;
}

/// A provider that always returns the same header.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticAuthorization {
    header: KeyValue,
}

impl StaticAuthorization {
    /// Creates a provider returning `key: value`.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            header: KeyValue::new(key, value),
        }
    }

    /// Creates a provider returning `Authorization: Bearer <token>`.
    #[must_use]
    pub fn bearer(token: impl AsRef<str>) -> Self {
        Self::new("Authorization", format!("Bearer {}", token.as_ref()))
    }
}

// The header value usually carries a credential.
impl fmt::Debug for StaticAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StaticAuthorization({}: *****)", self.header.key())
    }
}

#[async_trait]
impl AuthorizationProvider for StaticAuthorization {
    async fn authorization_header(&self) -> Result<Option<KeyValue>, AuthorizationError> {
        Ok(Some(self.header.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_authorization_returns_header() {
        let provider = StaticAuthorization::new("X-Api-Key", "abc");
        let header = tokio_test::block_on(provider.authorization_header()).unwrap();
        assert_eq!(header, Some(KeyValue::new("X-Api-Key", "abc")));
    }

    #[test]
    fn test_bearer_formats_value() {
        let provider = StaticAuthorization::bearer("t0k3n");
        let header = tokio_test::block_on(provider.authorization_header())
            .unwrap()
            .unwrap();
        assert_eq!(header.value(), "Bearer t0k3n");
    }

    #[test]
    fn test_debug_masks_value() {
        let provider = StaticAuthorization::bearer("t0k3n");
        let debug = format!("{provider:?}");
        assert!(!debug.contains("t0k3n"));
        assert!(debug.contains("Authorization"));
    }

    #[test]
    fn test_error_message() {
        let error = AuthorizationError::new("token expired");
        assert_eq!(
            error.to_string(),
            "Authorization header unavailable: token expired"
        );
    }
}
