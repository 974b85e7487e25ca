//! HTTP execution layer.
//!
//! # Overview
//!
//! - [`HttpClient`]: merges request defaults, appends authorization, sends and
//!   validates responses
//! - [`Transport`]: the async send seam, implemented by [`ReqwestTransport`]
//! - [`RequestPlan`] / [`RequestEnvelope`]: a request before and after merging
//! - [`HttpResponse`]: the raw response from a transport
//! - [`HttpError`]: unified error type for this layer
//!
//! # Example
//!
//! ```rust,ignore
//! use declarative_rest::{HttpClient, RequestConfig};
//! use declarative_rest::auth::StaticAuthorization;
//!
//! let client = HttpClient::builder()
//!     .config(RequestConfig::json())
//!     .authorization(StaticAuthorization::bearer("token"))
//!     .build()?;
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{
    HttpError, HttpStatusError, InvalidHttpRequestError, InvalidResponseError, TransportError,
};
pub use http_client::{merge_key_values, HttpClient, HttpClientBuilder};
pub use http_request::{
    HttpMethod, RequestEnvelope, RequestEnvelopeBuilder, RequestOverrides, RequestPlan,
};
pub use http_response::HttpResponse;
pub use transport::{ReqwestTransport, Transport, TransportRequest, SDK_VERSION};
