//! Response wrapper for generated read methods.
//!
//! [`ResourceResponse<T>`] pairs the decoded payload with where the envelope
//! resolver found it and the request ID of the response. It implements
//! `Deref<Target = T>`, so it can be used like the inner value:
//!
//! ```rust,ignore
//! let posts: ResourceResponse<Vec<Post>> = Post::get_many(&client, &[], None).await?;
//!
//! for post in posts.iter() {
//!     println!("{}", post.title);
//! }
//! println!("{} posts under '{}'", posts.len(), posts.found_key());
//!
//! let posts: Vec<Post> = posts.into_inner();
//! ```

use std::ops::{Deref, DerefMut};

use crate::rest::envelope::ResponseEnvelope;

/// A decoded payload plus envelope and response metadata.
///
/// # Example
///
/// ```rust
/// use declarative_rest::rest::{ResourceResponse, ResponseEnvelope};
///
/// let envelope = ResponseEnvelope {
///     data: vec![1, 2, 3],
///     found_key: "data".to_string(),
///     is_array: false,
/// };
/// let response = ResourceResponse::from_envelope(envelope, Some("req-1".to_string()));
///
/// assert_eq!(response.len(), 3);
/// assert_eq!(response.found_key(), "data");
/// assert_eq!(response.request_id(), Some("req-1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceResponse<T> {
    data: T,
    found_key: String,
    is_array: bool,
    request_id: Option<String>,
}

impl<T> ResourceResponse<T> {
    /// Wraps a resolved envelope.
    #[must_use]
    pub fn from_envelope(envelope: ResponseEnvelope<T>, request_id: Option<String>) -> Self {
        Self {
            data: envelope.data,
            found_key: envelope.found_key,
            is_array: envelope.is_array,
            request_id,
        }
    }

    /// Consumes the wrapper and returns the payload.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns a reference to the payload.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// The key the payload was found under; empty if it was the root.
    #[must_use]
    pub fn found_key(&self) -> &str {
        &self.found_key
    }

    /// Whether the payload was a bare array at the root.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.is_array
    }

    /// The `X-Request-Id` of the response, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Maps the payload, keeping the metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> ResourceResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ResourceResponse {
            data: f(self.data),
            found_key: self.found_key,
            is_array: self.is_array,
            request_id: self.request_id,
        }
    }
}

impl<T> Deref for ResourceResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ResourceResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

// Verify ResourceResponse is Send + Sync when T is Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceResponse<String>>();
    assert_send_sync::<ResourceResponse<Vec<String>>>();
};
