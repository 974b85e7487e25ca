//! Error types for generated resource methods.
//!
//! [`ResourceError`] is what every generated method returns. It wraps the
//! HTTP layer's [`HttpError`] and adds the failures that belong to the
//! resource layer: body encoding, envelope decoding and path resolution.

use thiserror::Error;

use crate::clients::HttpError;
use crate::error::BuildError;
use crate::rest::Verb;

/// Response bytes could not be decoded into the target type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Could not decode {target}: {reason}")]
pub struct DecodingError {
    /// The decode target (a body shape or type name).
    pub target: String,
    /// Why decoding failed.
    pub reason: String,
}

/// A request body could not be produced from the instance.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Could not encode {shape}: {reason}")]
pub struct EncodingError {
    /// The body shape being encoded.
    pub shape: String,
    /// Why encoding failed.
    pub reason: String,
}

/// Unified error type for generated resource methods.
///
/// # Example
///
/// ```rust
/// use declarative_rest::rest::{ResourceError, Verb};
///
/// let error = ResourceError::UnsupportedVerb {
///     resource: "Post".to_string(),
///     verb: Verb::Delete,
/// };
/// assert!(error.to_string().contains("delete"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource declaration is invalid.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The request failed in the HTTP layer.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response body could not be decoded.
    #[error(transparent)]
    Decoding(#[from] DecodingError),

    /// The request body could not be encoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The resource declares no directive for the requested verb.
    #[error("{resource} declares no {verb} directive")]
    UnsupportedVerb {
        /// The resource name.
        resource: String,
        /// The verb that was called.
        verb: Verb,
    },

    /// The number of positional path arguments does not match the template.
    #[error("'{template}' takes {expected} path argument(s), {provided} given")]
    PathArgumentCount {
        /// The URL template.
        template: String,
        /// Distinct parameters in the template.
        expected: usize,
        /// Arguments supplied by the caller.
        provided: usize,
    },

    /// An instance property named in the path cannot be rendered into a URL.
    #[error("Path property '{property}' cannot be used in a URL: {reason}")]
    PathValueUnavailable {
        /// The property name.
        property: String,
        /// Why the value is unusable.
        reason: String,
    },
}

impl ResourceError {
    /// Returns the HTTP status code if the server rejected the request.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status_code(),
            _ => None,
        }
    }

    /// Returns the request ID from a rejected response, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Http(HttpError::Status(e)) => e.error_reference.as_deref(),
            _ => None,
        }
    }
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
    assert_send_sync::<DecodingError>();
    assert_send_sync::<EncodingError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpStatusError;

    #[test]
    fn test_decoding_error_message() {
        let error = DecodingError {
            target: "PostGetOneResponse".to_string(),
            reason: "no key produced a valid decode".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Could not decode PostGetOneResponse: no key produced a valid decode"
        );
    }

    #[test]
    fn test_status_code_from_http_error() {
        let error = ResourceError::Http(HttpError::Status(HttpStatusError {
            code: 404,
            body: "{}".to_string(),
            error_reference: Some("req-1".to_string()),
        }));
        assert_eq!(error.status_code(), Some(404));
        assert_eq!(error.request_id(), Some("req-1"));
    }

    #[test]
    fn test_status_code_none_for_local_errors() {
        let error = ResourceError::PathArgumentCount {
            template: "https://api.com/:id".to_string(),
            expected: 1,
            provided: 2,
        };
        assert_eq!(error.status_code(), None);
        assert_eq!(error.request_id(), None);
        assert!(error.to_string().contains("takes 1 path argument(s), 2 given"));
    }

    #[test]
    fn test_build_error_converts() {
        let error: ResourceError = BuildError::InvalidUrl {
            url: "x".to_string(),
            reason: "bad".to_string(),
        }
        .into();
        assert!(matches!(error, ResourceError::Build(_)));
    }
}
