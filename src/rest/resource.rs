//! The declaration trait for REST-backed models.
//!
//! A type implementing [`RestModel`] declares its fields and one directive
//! per supported verb. In return it gets `get_one`, `get_many`, `create`,
//! `update` and `remove`.
//!
//! # Example
//!
//! ```rust,ignore
//! use declarative_rest::rest::{Directive, FieldDescriptor, FieldType, ResourceSchema, RestModel};
//! use declarative_rest::{HttpClient, RequestConfig};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Post {
//!     id: u64,
//!     title: String,
//! }
//!
//! impl RestModel for Post {
//!     const NAME: &'static str = "Post";
//!
//!     fn schema() -> ResourceSchema {
//!         ResourceSchema::new(Self::NAME)
//!             .field(FieldDescriptor::new("id", FieldType::Integer).excluded())
//!             .field(FieldDescriptor::new("title", FieldType::String))
//!     }
//!
//!     fn directives() -> Vec<Directive> {
//!         vec![
//!             Directive::get_one("https://api.example.com/posts/:id"),
//!             Directive::create("https://api.example.com/posts"),
//!         ]
//!     }
//! }
//!
//! let client = HttpClient::new(RequestConfig::json())?;
//! let post = Post::get_one(&client, &["12"], None).await?;
//! post.create(&client, None).await?;
//! ```

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::clients::{HttpClient, RequestOverrides};
use crate::error::BuildError;
use crate::rest::definition::ResourceDefinition;
use crate::rest::errors::{EncodingError, ResourceError};
use crate::rest::response::ResourceResponse;
use crate::rest::schema::ResourceSchema;
use crate::rest::{Directive, Verb};

/// A model backed by a REST resource.
///
/// The definition is built from [`schema`](RestModel::schema) and
/// [`directives`](RestModel::directives) on first use and shared afterwards.
/// Declaration errors surface as [`ResourceError::Build`] from every method.
/// Call [`RestModel::definition`] at startup to catch them early.
///
/// Schema field names must match the model's serde property names.
#[allow(async_fn_in_trait)]
pub trait RestModel: Serialize + DeserializeOwned + Send + Sync + Sized + 'static {
    /// The resource name used in errors and body shape names.
    const NAME: &'static str;

    /// The model's fields and per-field directives.
    fn schema() -> ResourceSchema;

    /// One directive per supported verb.
    fn directives() -> Vec<Directive>;

    /// Returns the validated resource definition, building it on first use.
    ///
    /// Later calls return the same definition (or the same error) without
    /// rebuilding.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the declaration is invalid.
    fn definition() -> Result<Arc<ResourceDefinition>, BuildError> {
        cached_definition::<Self>()
    }

    /// Fetches a single resource.
    ///
    /// `path_args` supplies one value per distinct path parameter of the
    /// get-one template, in order of first appearance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the declaration is invalid, the request
    /// fails or the response cannot be decoded.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let post = Post::get_one(&client, &["12"], None).await?;
    /// println!("{} (found under '{}')", post.title, post.found_key());
    /// ```
    async fn get_one(
        client: &HttpClient,
        path_args: &[&str],
        overrides: Option<RequestOverrides>,
    ) -> Result<ResourceResponse<Self>, ResourceError> {
        let definition = Self::definition()?;
        let method = definition.require(Verb::GetOne)?;

        let plan = method.plan_read(path_args, overrides.unwrap_or_default())?;
        let response = client.request(plan).await?;

        let envelope = method.decode_one(&response.body)?;
        Ok(ResourceResponse::from_envelope(
            envelope,
            response.request_id().map(ToString::to_string),
        ))
    }

    /// Fetches a collection of resources.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the declaration is invalid, the request
    /// fails or the response cannot be decoded.
    async fn get_many(
        client: &HttpClient,
        path_args: &[&str],
        overrides: Option<RequestOverrides>,
    ) -> Result<ResourceResponse<Vec<Self>>, ResourceError> {
        let definition = Self::definition()?;
        let method = definition.require(Verb::GetMany)?;

        let plan = method.plan_read(path_args, overrides.unwrap_or_default())?;
        let response = client.request(plan).await?;

        let envelope = method.decode_many(&response.body)?;
        Ok(ResourceResponse::from_envelope(
            envelope,
            response.request_id().map(ToString::to_string),
        ))
    }

    /// Creates the resource from this instance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the declaration is invalid, the body
    /// cannot be encoded or the request fails.
    async fn create(
        &self,
        client: &HttpClient,
        overrides: Option<RequestOverrides>,
    ) -> Result<(), ResourceError> {
        send_write(self, Verb::Create, client, overrides).await
    }

    /// Updates the resource from this instance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the declaration is invalid, the body
    /// cannot be encoded or the request fails.
    async fn update(
        &self,
        client: &HttpClient,
        overrides: Option<RequestOverrides>,
    ) -> Result<(), ResourceError> {
        send_write(self, Verb::Update, client, overrides).await
    }

    /// Deletes the resource this instance points at.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the declaration is invalid, a path value
    /// is unavailable or the request fails.
    async fn remove(
        &self,
        client: &HttpClient,
        overrides: Option<RequestOverrides>,
    ) -> Result<(), ResourceError> {
        send_write(self, Verb::Delete, client, overrides).await
    }
}

type DefinitionCache = RwLock<HashMap<TypeId, Result<Arc<ResourceDefinition>, BuildError>>>;

/// Definitions of every model used so far, keyed by model type.
static DEFINITIONS: OnceLock<DefinitionCache> = OnceLock::new();

fn cached_definition<M: RestModel>() -> Result<Arc<ResourceDefinition>, BuildError> {
    let cache = DEFINITIONS.get_or_init(DefinitionCache::default);
    let key = TypeId::of::<M>();

    let cached = cache
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .cloned();
    if let Some(entry) = cached {
        return entry;
    }

    // Built outside the lock; a concurrent first use keeps whichever entry landed first
    let built = ResourceDefinition::for_model::<M>().map(Arc::new);
    cache
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(key)
        .or_insert(built)
        .clone()
}

async fn send_write<M: RestModel>(
    model: &M,
    verb: Verb,
    client: &HttpClient,
    overrides: Option<RequestOverrides>,
) -> Result<(), ResourceError> {
    let definition = M::definition()?;
    let method = definition.require(verb)?;

    let instance = instance_properties(model)?;
    let plan = method.plan_write(&instance, overrides.unwrap_or_default())?;

    // Write methods do not decode the response body
    client.request(plan).await?;
    Ok(())
}

fn instance_properties<M: RestModel>(model: &M) -> Result<Map<String, Value>, EncodingError> {
    let encoding_error = |reason: String| EncodingError {
        shape: M::NAME.to_string(),
        reason,
    };
    match serde_json::to_value(model) {
        Ok(Value::Object(properties)) => Ok(properties),
        Ok(_) => Err(encoding_error(
            "model does not serialize to a JSON object".to_string(),
        )),
        Err(e) => Err(encoding_error(e.to_string())),
    }
}
