//! Request and response body shapes.
//!
//! A [`BodyShape`] is derived from a [`ResourceSchema`] once per method. Request
//! shapes leave out excluded fields; response shapes keep every field. Both map
//! property names to wire keys, and carry an explicit key mapping only when at
//! least one field is renamed.
//!
//! Decoding into a model is always two steps: the wire object is decoded into
//! the shape (a property-keyed map, checked field by field), then the map is
//! copied into the model with `serde_json::from_value`.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::rest::errors::EncodingError;
use crate::rest::schema::{FieldDescriptor, FieldType, ResourceSchema};
use crate::rest::Verb;

/// One field of a body shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeField {
    /// The model property name.
    pub property: String,
    /// The key used on the wire.
    pub wire_key: String,
    /// The required wire type.
    pub field_type: FieldType,
    /// Whether the field may be absent or `null`.
    pub optional: bool,
}

impl From<&FieldDescriptor> for ShapeField {
    fn from(field: &FieldDescriptor) -> Self {
        Self {
            property: field.name().to_string(),
            wire_key: field.wire_name().to_string(),
            field_type: field.field_type(),
            optional: field.is_optional(),
        }
    }
}

/// The serialized form of a resource for one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyShape {
    name: String,
    fields: Vec<ShapeField>,
    key_mapping: Option<Vec<(String, String)>>,
}

const fn verb_label(verb: Verb) -> &'static str {
    match verb {
        Verb::GetOne => "GetOne",
        Verb::GetMany => "GetMany",
        Verb::Create => "Create",
        Verb::Update => "Update",
        Verb::Delete => "Delete",
    }
}

impl BodyShape {
    /// Builds the request body shape: every field not marked excluded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use declarative_rest::rest::{BodyShape, FieldDescriptor, FieldType, ResourceSchema, Verb};
    ///
    /// let schema = ResourceSchema::new("User")
    ///     .field(FieldDescriptor::new("id", FieldType::Integer).excluded())
    ///     .field(FieldDescriptor::new("name", FieldType::String).wire_key("name_value"));
    ///
    /// let shape = BodyShape::request(&schema, Verb::Create);
    /// assert_eq!(shape.name(), "UserCreateRequest");
    /// assert!(!shape.contains_property("id"));
    /// assert_eq!(
    ///     shape.key_mapping(),
    ///     Some(&[("name".to_string(), "name_value".to_string())][..])
    /// );
    /// ```
    #[must_use]
    pub fn request(schema: &ResourceSchema, verb: Verb) -> Self {
        Self::from_fields(
            format!("{}{}Request", schema.name(), verb_label(verb)),
            schema.fields().iter().filter(|f| !f.is_excluded()),
        )
    }

    /// Builds the response body shape: every field, excluded ones included.
    #[must_use]
    pub fn response(schema: &ResourceSchema, verb: Verb) -> Self {
        Self::from_fields(
            format!("{}{}Response", schema.name(), verb_label(verb)),
            schema.fields().iter(),
        )
    }

    fn from_fields<'a>(name: String, fields: impl Iterator<Item = &'a FieldDescriptor>) -> Self {
        let fields: Vec<ShapeField> = fields.map(ShapeField::from).collect();
        let renamed = fields.iter().any(|f| f.property != f.wire_key);
        let key_mapping = renamed.then(|| {
            fields
                .iter()
                .map(|f| (f.property.clone(), f.wire_key.clone()))
                .collect()
        });
        Self {
            name,
            fields,
            key_mapping,
        }
    }

    /// The shape name, used in error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[ShapeField] {
        &self.fields
    }

    /// `(property, wire key)` pairs for every field, present only if some
    /// field is renamed.
    #[must_use]
    pub fn key_mapping(&self) -> Option<&[(String, String)]> {
        self.key_mapping.as_deref()
    }

    /// Returns `true` if the shape carries this property.
    #[must_use]
    pub fn contains_property(&self, property: &str) -> bool {
        self.fields.iter().any(|f| f.property == property)
    }

    /// Encodes a property-keyed map into the wire object.
    ///
    /// Properties not in the shape are dropped. Optional fields that are
    /// missing or `null` are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError`] if a required field is missing or `null`.
    pub fn encode(&self, properties: &Map<String, Value>) -> Result<Value, EncodingError> {
        let mut wire = Map::new();
        for field in &self.fields {
            match properties.get(&field.property) {
                None | Some(Value::Null) if field.optional => {}
                None | Some(Value::Null) => {
                    return Err(EncodingError {
                        shape: self.name.clone(),
                        reason: format!("required field '{}' has no value", field.property),
                    });
                }
                Some(value) => {
                    wire.insert(field.wire_key.clone(), value.clone());
                }
            }
        }
        Ok(Value::Object(wire))
    }

    /// Decodes a wire object into a property-keyed map.
    ///
    /// Unknown keys are ignored. Optional fields that are missing decode as
    /// `null`.
    ///
    /// # Errors
    ///
    /// Returns a reason string if `value` is not an object, a required key is
    /// missing or `null`, or a value has the wrong type.
    pub fn decode(&self, value: &Value) -> Result<Map<String, Value>, String> {
        let Value::Object(object) = value else {
            return Err(format!("expected an object, found {}", json_kind(value)));
        };

        let mut properties = Map::new();
        for field in &self.fields {
            match object.get(&field.wire_key) {
                None | Some(Value::Null) if field.optional => {
                    properties.insert(field.property.clone(), Value::Null);
                }
                None | Some(Value::Null) => {
                    return Err(format!("missing required key '{}'", field.wire_key));
                }
                Some(v) if !field.field_type.matches(v) => {
                    return Err(format!(
                        "key '{}' should be {}, found {}",
                        field.wire_key,
                        field.field_type,
                        json_kind(v)
                    ));
                }
                Some(v) => {
                    properties.insert(field.property.clone(), v.clone());
                }
            }
        }
        Ok(properties)
    }

    /// Decodes a wire object and copies the result into `T`.
    ///
    /// # Errors
    ///
    /// Returns a reason string if shape decoding or the copy into `T` fails.
    pub fn decode_into<T: DeserializeOwned>(&self, value: &Value) -> Result<T, String> {
        let properties = self.decode(value)?;
        serde_json::from_value(Value::Object(properties)).map_err(|e| e.to_string())
    }
}

pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
