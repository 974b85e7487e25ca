//! Authorization header providers.
//!
//! The [`HttpClient`](crate::clients::HttpClient) asks its
//! [`AuthorizationProvider`] for a header before every request. When the
//! provider yields a header it is appended after every other header; when it
//! yields `None` nothing is added.
//!
//! # Example
//!
//! ```rust
//! use declarative_rest::auth::{AuthorizationProvider, StaticAuthorization};
//!
//! # tokio_test::block_on(async {
//! let provider = StaticAuthorization::bearer("secret-token");
//! let header = provider.authorization_header().await.unwrap().unwrap();
//! assert_eq!(header.key(), "Authorization");
//! assert_eq!(header.value(), "Bearer secret-token");
//! # });
//! ```

mod provider;

pub use provider::{AuthorizationError, AuthorizationProvider, StaticAuthorization};
