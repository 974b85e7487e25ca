//! Turning a schema and its directives into per-verb method definitions.
//!
//! [`ResourceDefinition::build`] is a pure, single-pass builder. It validates
//! the whole declaration and either returns a definition for every declared
//! verb or a single [`BuildError`].
//!
//! # Example
//!
//! ```rust
//! use declarative_rest::rest::{
//!     Directive, FieldDescriptor, FieldType, ResourceDefinition, ResourceSchema, Verb,
//! };
//!
//! let schema = ResourceSchema::new("Post")
//!     .field(FieldDescriptor::new("id", FieldType::Integer))
//!     .field(FieldDescriptor::new("title", FieldType::String));
//!
//! let definition = ResourceDefinition::build(
//!     schema,
//!     &[
//!         Directive::get_one("https://api.example.com/posts/:id"),
//!         Directive::delete("https://api.example.com/posts/:id"),
//!     ],
//! )
//! .unwrap();
//!
//! let get_one = definition.method(Verb::GetOne).unwrap();
//! assert_eq!(
//!     get_one.signature(),
//!     "get_one(id: &str, dynamic_headers: Option<Vec<KeyValue>>, \
//!      dynamic_query_params: Option<Vec<KeyValue>>)"
//! );
//! assert!(definition.method(Verb::Create).is_none());
//! ```

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::clients::{HttpMethod, RequestOverrides, RequestPlan};
use crate::config::KeyValue;
use crate::error::BuildError;
use crate::rest::body::{json_kind, BodyShape};
use crate::rest::envelope::{resolve_envelope, ResponseEnvelope, TargetShape};
use crate::rest::errors::{DecodingError, EncodingError, ResourceError};
use crate::rest::path::PathTemplate;
use crate::rest::schema::ResourceSchema;
use crate::rest::{Directive, RestModel, Verb};

/// One argument of a generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodArgument {
    /// A required path parameter, supplied as a string.
    Path(String),
    /// Optional per-call headers.
    DynamicHeaders,
    /// Optional per-call query parameters.
    DynamicQueryParams,
}

impl MethodArgument {
    fn render(&self) -> String {
        match self {
            Self::Path(name) => format!("{name}: &str"),
            Self::DynamicHeaders => "dynamic_headers: Option<Vec<KeyValue>>".to_string(),
            Self::DynamicQueryParams => "dynamic_query_params: Option<Vec<KeyValue>>".to_string(),
        }
    }
}

/// What a generated method decodes from the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShape {
    /// Nothing is decoded.
    Empty,
    /// A single value of the shape.
    Single(BodyShape),
    /// A sequence of values of the shape.
    Collection(BodyShape),
}

/// The definition of one generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDefinition {
    resource: String,
    verb: Verb,
    path: PathTemplate,
    arguments: Vec<MethodArgument>,
    static_headers: Vec<KeyValue>,
    static_query_params: Vec<KeyValue>,
    request_body: Option<BodyShape>,
    response: ResponseShape,
}

impl MethodDefinition {
    fn synthesize(schema: &ResourceSchema, directive: &Directive, path: PathTemplate) -> Self {
        let verb = directive.verb();

        let mut arguments: Vec<MethodArgument> = if verb.is_read() {
            path.parameters()
                .iter()
                .cloned()
                .map(MethodArgument::Path)
                .collect()
        } else {
            Vec::new()
        };
        arguments.push(MethodArgument::DynamicHeaders);
        arguments.push(MethodArgument::DynamicQueryParams);

        let request_body = matches!(verb, Verb::Create | Verb::Update)
            .then(|| BodyShape::request(schema, verb));

        let response = match verb {
            Verb::GetOne => ResponseShape::Single(BodyShape::response(schema, verb)),
            Verb::GetMany => ResponseShape::Collection(BodyShape::response(schema, verb)),
            Verb::Create | Verb::Update | Verb::Delete => ResponseShape::Empty,
        };

        Self {
            resource: schema.name().to_string(),
            verb,
            path,
            arguments,
            static_headers: directive.static_headers().to_vec(),
            static_query_params: directive.static_query_params().to_vec(),
            request_body,
            response,
        }
    }

    /// The verb this method implements.
    #[must_use]
    pub const fn verb(&self) -> Verb {
        self.verb
    }

    /// The generated method's name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.verb.method_name()
    }

    /// The HTTP method sent.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        self.verb.http_method()
    }

    /// The URL template.
    #[must_use]
    pub const fn path(&self) -> &PathTemplate {
        &self.path
    }

    /// The method's arguments in order.
    #[must_use]
    pub fn arguments(&self) -> &[MethodArgument] {
        &self.arguments
    }

    /// Headers declared on the directive.
    #[must_use]
    pub fn static_headers(&self) -> &[KeyValue] {
        &self.static_headers
    }

    /// Query parameters declared on the directive.
    #[must_use]
    pub fn static_query_params(&self) -> &[KeyValue] {
        &self.static_query_params
    }

    /// The request body shape, for create and update.
    #[must_use]
    pub const fn request_body(&self) -> Option<&BodyShape> {
        self.request_body.as_ref()
    }

    /// What the method decodes from the response.
    #[must_use]
    pub const fn response(&self) -> &ResponseShape {
        &self.response
    }

    /// Renders the method signature, e.g.
    /// `remove(dynamic_headers: Option<Vec<KeyValue>>, dynamic_query_params: Option<Vec<KeyValue>>)`.
    #[must_use]
    pub fn signature(&self) -> String {
        let arguments: Vec<String> = self.arguments.iter().map(MethodArgument::render).collect();
        format!("{}({})", self.name(), arguments.join(", "))
    }

    fn plan(&self, path: String, overrides: RequestOverrides, body: Option<Vec<u8>>) -> RequestPlan {
        RequestPlan {
            method: self.http_method(),
            path,
            static_headers: self.static_headers.clone(),
            static_query_params: self.static_query_params.clone(),
            overrides,
            body,
        }
    }

    /// Builds the request plan for a read method from positional path arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathArgumentCount`] if `path_args` does not
    /// supply one value per distinct path parameter.
    pub fn plan_read(
        &self,
        path_args: &[&str],
        overrides: RequestOverrides,
    ) -> Result<RequestPlan, ResourceError> {
        let path = self.path.resolve(path_args)?;
        Ok(self.plan(path, overrides, None))
    }

    /// Builds the request plan for a write method from the instance's
    /// properties.
    ///
    /// Path parameters are read from the instance. Create and update also
    /// encode the request body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathValueUnavailable`] if a path property is
    /// missing, `null` or not a scalar, and [`ResourceError::Encoding`] if the
    /// body cannot be encoded.
    pub fn plan_write(
        &self,
        instance: &Map<String, Value>,
        overrides: RequestOverrides,
    ) -> Result<RequestPlan, ResourceError> {
        let path = self
            .path
            .resolve_with(|property| path_value(instance, property))?;

        let body = match &self.request_body {
            Some(shape) => {
                let wire = shape.encode(instance)?;
                let bytes = serde_json::to_vec(&wire).map_err(|e| EncodingError {
                    shape: shape.name().to_string(),
                    reason: e.to_string(),
                })?;
                Some(bytes)
            }
            None => None,
        };

        Ok(self.plan(path, overrides, body))
    }

    /// Decodes a single value from response bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DecodingError`] if the method has no single response shape or
    /// the envelope cannot be resolved.
    pub fn decode_one<T: DeserializeOwned>(
        &self,
        bytes: &[u8],
    ) -> Result<ResponseEnvelope<T>, DecodingError> {
        let ResponseShape::Single(shape) = &self.response else {
            return Err(self.no_response_shape("a single value"));
        };
        resolve_envelope(bytes, TargetShape::Single, shape.name(), |value| {
            shape.decode_into(value)
        })
    }

    /// Decodes a sequence of values from response bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DecodingError`] if the method has no collection response shape
    /// or the envelope cannot be resolved.
    pub fn decode_many<T: DeserializeOwned>(
        &self,
        bytes: &[u8],
    ) -> Result<ResponseEnvelope<Vec<T>>, DecodingError> {
        let ResponseShape::Collection(shape) = &self.response else {
            return Err(self.no_response_shape("a collection"));
        };
        resolve_envelope(bytes, TargetShape::Sequence, shape.name(), |value| {
            let Value::Array(items) = value else {
                return Err(format!("expected an array, found {}", json_kind(value)));
            };
            items.iter().map(|item| shape.decode_into(item)).collect()
        })
    }

    fn no_response_shape(&self, expected: &str) -> DecodingError {
        DecodingError {
            target: format!("{}::{}", self.resource, self.name()),
            reason: format!("method does not decode {expected}"),
        }
    }
}

fn path_value(instance: &Map<String, Value>, property: &str) -> Result<String, ResourceError> {
    let unavailable = |reason: &str| ResourceError::PathValueUnavailable {
        property: property.to_string(),
        reason: reason.to_string(),
    };
    match instance.get(property) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::Null) => Err(unavailable("value is null")),
        Some(Value::Array(_) | Value::Object(_)) => {
            Err(unavailable("composite values cannot be placed in a path"))
        }
        None => Err(unavailable("property is not present on the instance")),
    }
}

/// The generated methods of one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDefinition {
    schema: ResourceSchema,
    methods: Vec<MethodDefinition>,
}

impl ResourceDefinition {
    /// Validates the declaration and synthesizes one method per directive.
    ///
    /// # Errors
    ///
    /// - [`BuildError::DuplicateDirective`] if a verb is declared twice
    /// - [`BuildError::InvalidUrl`] if a template is not an absolute URL
    /// - [`BuildError::MissingPathProperty`] if a create, update or delete
    ///   template names a parameter that is not a schema field
    pub fn build(schema: ResourceSchema, directives: &[Directive]) -> Result<Self, BuildError> {
        let mut methods: Vec<MethodDefinition> = Vec::with_capacity(directives.len());

        for directive in directives {
            let verb = directive.verb();

            if methods.iter().any(|m| m.verb == verb) {
                tracing::warn!(resource = schema.name(), %verb, "duplicate directive");
                return Err(BuildError::DuplicateDirective {
                    resource: schema.name().to_string(),
                    verb,
                });
            }

            let path = PathTemplate::parse(directive.url_template()).map_err(|e| {
                tracing::warn!(resource = schema.name(), %verb, error = %e, "invalid URL template");
                e
            })?;

            if !verb.is_read() {
                if let Some(property) = path.parameters().iter().find(|p| !schema.has_field(p)) {
                    tracing::warn!(
                        resource = schema.name(),
                        %verb,
                        property = %property,
                        "path parameter has no matching field"
                    );
                    return Err(BuildError::MissingPathProperty {
                        resource: schema.name().to_string(),
                        verb,
                        property: property.clone(),
                    });
                }
            }

            methods.push(MethodDefinition::synthesize(&schema, directive, path));
        }

        tracing::debug!(
            resource = schema.name(),
            methods = methods.len(),
            "built resource definition"
        );
        Ok(Self { schema, methods })
    }

    /// Builds the definition declared by a [`RestModel`].
    ///
    /// Calling this at startup surfaces declaration errors before the first
    /// request.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`ResourceDefinition::build`].
    pub fn for_model<M: RestModel>() -> Result<Self, BuildError> {
        Self::build(M::schema(), &M::directives())
    }

    /// The resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.schema.name()
    }

    /// The schema the definition was built from.
    #[must_use]
    pub const fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    /// The methods in directive order.
    #[must_use]
    pub fn methods(&self) -> &[MethodDefinition] {
        &self.methods
    }

    /// The method for `verb`, if declared.
    #[must_use]
    pub fn method(&self, verb: Verb) -> Option<&MethodDefinition> {
        self.methods.iter().find(|m| m.verb == verb)
    }

    /// The method for `verb`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnsupportedVerb`] if no directive was declared
    /// for `verb`.
    pub fn require(&self, verb: Verb) -> Result<&MethodDefinition, ResourceError> {
        self.method(verb).ok_or_else(|| ResourceError::UnsupportedVerb {
            resource: self.name().to_string(),
            verb,
        })
    }
}
