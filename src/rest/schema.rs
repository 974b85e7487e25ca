//! The per-field metadata table describing a resource.
//!
//! A [`ResourceSchema`] lists the model's fields in declaration order. Field
//! names are the model's own (serde) property names; a field may carry a wire
//! key rename and may be excluded from request bodies.
//!
//! # Example
//!
//! ```rust
//! use declarative_rest::rest::{FieldDescriptor, FieldType, ResourceSchema};
//!
//! let schema = ResourceSchema::new("Post")
//!     .field(FieldDescriptor::new("id", FieldType::Integer).excluded())
//!     .field(FieldDescriptor::new("title", FieldType::String))
//!     .field(FieldDescriptor::new("user_id", FieldType::Integer).wire_key("userId"));
//!
//! assert_eq!(schema.fields().len(), 3);
//! assert!(schema.has_field("user_id"));
//! assert_eq!(schema.field_named("user_id").unwrap().wire_name(), "userId");
//! ```

use std::fmt;

use serde_json::Value;

/// The JSON type a field must have on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A JSON string.
    String,
    /// A JSON number without a fractional part.
    Integer,
    /// Any JSON number.
    Number,
    /// A JSON boolean.
    Boolean,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
    /// Any JSON value.
    Any,
}

impl FieldType {
    /// Returns `true` if `value` has this type. `null` never matches.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => false,
            (Self::Any, _)
            | (Self::String, Value::String(_))
            | (Self::Number, Value::Number(_))
            | (Self::Boolean, Value::Bool(_))
            | (Self::Array, Value::Array(_))
            | (Self::Object, Value::Object(_)) => true,
            (Self::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            _ => false,
        }
    }

    /// Returns the type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of a resource and its per-field directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    field_type: FieldType,
    optional: bool,
    excluded: bool,
    wire_key: Option<String>,
}

impl FieldDescriptor {
    /// Creates a required, included field with no rename.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            optional: false,
            excluded: false,
            wire_key: None,
        }
    }

    /// Marks the field as optional: it may be missing or `null` on the wire.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Excludes the field from request bodies. It is still read from responses.
    #[must_use]
    pub const fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    /// Sends and reads the field under `key` instead of its property name.
    #[must_use]
    pub fn wire_key(mut self, key: impl Into<String>) -> Self {
        self.wire_key = Some(key.into());
        self
    }

    /// The model property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wire type.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Whether the field may be absent.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    /// Whether the field is left out of request bodies.
    #[must_use]
    pub const fn is_excluded(&self) -> bool {
        self.excluded
    }

    /// The explicit wire key, if the field is renamed.
    #[must_use]
    pub fn renamed_to(&self) -> Option<&str> {
        self.wire_key.as_deref()
    }

    /// The key used on the wire: the rename if present, else the name.
    #[must_use]
    pub fn wire_name(&self) -> &str {
        self.wire_key.as_deref().unwrap_or(&self.name)
    }
}

/// The ordered field list of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl ResourceSchema {
    /// Creates an empty schema for the named resource.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// The resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a field by property name.
    #[must_use]
    pub fn field_named(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns `true` if a field with this property name exists.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field_named(name).is_some()
    }
}
