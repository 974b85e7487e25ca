//! Declarative REST resources.
//!
//! This module turns a resource declaration into request methods:
//!
//! - **[`ResourceSchema`]**: the model's fields with exclusion and rename flags
//! - **[`Directive`]**: one URL template (plus static headers and query
//!   parameters) per [`Verb`]
//! - **[`ResourceDefinition`]**: the validated, per-verb [`MethodDefinition`]s
//! - **[`RestModel`] trait**: the declaration surface, providing `get_one`,
//!   `get_many`, `create`, `update` and `remove`
//! - **Envelope resolution**: [`resolve_envelope`] finds a payload whether it is
//!   bare, a bare array, or wrapped under a key
//! - **[`ResourceResponse<T>`]**: a Deref-based wrapper carrying envelope metadata
//!
//! # Example
//!
//! ```rust,ignore
//! use declarative_rest::rest::{RestModel, ResourceResponse};
//! use declarative_rest::{HttpClient, RequestConfig, RequestOverrides};
//!
//! let client = HttpClient::new(RequestConfig::json())?;
//!
//! // GET https://api.example.com/posts/12
//! let post: ResourceResponse<Post> = Post::get_one(&client, &["12"], None).await?;
//! println!("{}", post.title);
//!
//! // GET https://api.example.com/posts?page=2
//! let page = RequestOverrides::new().query_param("page", "2");
//! let posts = Post::get_many(&client, &[], Some(page)).await?;
//! for post in posts.iter() {
//!     println!("- {}", post.title);
//! }
//!
//! // POST, PUT and DELETE resolve path parameters from the instance
//! let post = post.into_inner();
//! post.update(&client, None).await?;
//! post.remove(&client, None).await?;
//! ```

mod body;
mod definition;
mod directive;
mod envelope;
mod errors;
mod path;
mod resource;
mod response;
mod schema;

// Public exports
pub use body::{BodyShape, ShapeField};
pub use definition::{MethodArgument, MethodDefinition, ResourceDefinition, ResponseShape};
pub use directive::{Directive, Verb};
pub use envelope::{
    resolve, resolve_envelope, ResponseEnvelope, Strategy, TargetShape, SYNONYM_KEYS,
};
pub use errors::{DecodingError, EncodingError, ResourceError};
pub use path::{extract_path_parameters, PathTemplate};
pub use resource::RestModel;
pub use response::ResourceResponse;
pub use schema::{FieldDescriptor, FieldType, ResourceSchema};
