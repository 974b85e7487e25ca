//! Locating a payload of unknown wrapping inside a JSON document.
//!
//! Servers return the same payload bare (`{"id": 1}`), as a bare array
//! (`[{"id": 1}]`) or wrapped under a key (`{"data": {"id": 1}}`). The
//! resolver runs a fixed list of strategies in order and keeps the first
//! decode that succeeds:
//!
//! 1. [`Strategy::BareSequence`]: the target is a sequence and the root is an array
//! 2. [`Strategy::BareValue`]: the whole root
//! 3. [`Strategy::SynonymKeys`]: the value under each of [`SYNONYM_KEYS`], in order
//! 4. [`Strategy::DeclaredKeys`]: the value under each key of the root object,
//!    in document order
//!
//! # Example
//!
//! ```rust
//! use declarative_rest::rest::{resolve, TargetShape};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Post {
//!     id: u64,
//! }
//!
//! let envelope = resolve::<Post>(br#"{"data": {"id": 7}}"#, TargetShape::Single).unwrap();
//! assert_eq!(envelope.data.id, 7);
//! assert_eq!(envelope.found_key, "data");
//! assert!(!envelope.is_array);
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::rest::errors::DecodingError;

/// Conventional wrapper keys, tried in this order.
pub const SYNONYM_KEYS: [&str; 6] = ["data", "result", "payload", "response", "content", "body"];

/// Whether the caller expects one value or a sequence of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetShape {
    /// A single value.
    Single,
    /// An array of values.
    Sequence,
}

/// A decoded payload and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope<T> {
    /// The decoded payload.
    pub data: T,
    /// The key the payload was found under, or empty if it was the root.
    pub found_key: String,
    /// Whether the payload was a bare array at the root.
    pub is_array: bool,
}

/// One way of locating the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Decode the root array as the sequence target.
    BareSequence,
    /// Decode the whole root.
    BareValue,
    /// Decode the value under each conventional wrapper key.
    SynonymKeys,
    /// Decode the value under each key of the root object.
    DeclaredKeys,
}

impl Strategy {
    /// The strategies in the order they are attempted.
    pub const ORDER: [Self; 4] = [
        Self::BareSequence,
        Self::BareValue,
        Self::SynonymKeys,
        Self::DeclaredKeys,
    ];

    fn attempt<T, F>(
        self,
        root: &Value,
        target: TargetShape,
        target_name: &str,
        decode: &F,
    ) -> Option<ResponseEnvelope<T>>
    where
        F: Fn(&Value) -> Result<T, String>,
    {
        match self {
            Self::BareSequence => {
                if target != TargetShape::Sequence || !root.is_array() {
                    return None;
                }
                try_decode(root, "", true, target_name, decode)
            }
            Self::BareValue => try_decode(root, "", false, target_name, decode),
            Self::SynonymKeys => {
                let object = root.as_object()?;
                SYNONYM_KEYS.iter().find_map(|key| {
                    object
                        .get(*key)
                        .and_then(|value| try_decode(value, key, false, target_name, decode))
                })
            }
            Self::DeclaredKeys => {
                let object = root.as_object()?;
                object
                    .iter()
                    .find_map(|(key, value)| try_decode(value, key, false, target_name, decode))
            }
        }
    }
}

fn try_decode<T, F>(
    value: &Value,
    key: &str,
    is_array: bool,
    target_name: &str,
    decode: &F,
) -> Option<ResponseEnvelope<T>>
where
    F: Fn(&Value) -> Result<T, String>,
{
    match decode(value) {
        Ok(data) => Some(ResponseEnvelope {
            data,
            found_key: key.to_string(),
            is_array,
        }),
        Err(reason) => {
            tracing::trace!(target_name, key, %reason, "decode attempt failed");
            None
        }
    }
}

/// Resolves the payload in `bytes` using `decode` for every attempt.
///
/// `target_name` is used in logs and in the error message.
///
/// # Errors
///
/// Returns [`DecodingError`] if `bytes` is not JSON or no strategy produced a
/// successful decode.
pub fn resolve_envelope<T, F>(
    bytes: &[u8],
    target: TargetShape,
    target_name: &str,
    decode: F,
) -> Result<ResponseEnvelope<T>, DecodingError>
where
    F: Fn(&Value) -> Result<T, String>,
{
    let root: Value = serde_json::from_slice(bytes).map_err(|e| DecodingError {
        target: target_name.to_string(),
        reason: format!("response is not valid JSON: {e}"),
    })?;

    for strategy in Strategy::ORDER {
        if let Some(envelope) = strategy.attempt(&root, target, target_name, &decode) {
            tracing::debug!(
                target_name,
                ?strategy,
                found_key = %envelope.found_key,
                is_array = envelope.is_array,
                "resolved response envelope"
            );
            return Ok(envelope);
        }
    }

    Err(DecodingError {
        target: target_name.to_string(),
        reason: "no key produced a valid decode".to_string(),
    })
}

/// Resolves the payload in `bytes` as `T` using its `Deserialize` impl.
///
/// # Errors
///
/// Returns [`DecodingError`] under the same conditions as [`resolve_envelope`].
pub fn resolve<T: DeserializeOwned>(
    bytes: &[u8],
    target: TargetShape,
) -> Result<ResponseEnvelope<T>, DecodingError> {
    resolve_envelope(bytes, target, std::any::type_name::<T>(), |value| {
        T::deserialize(value).map_err(|e| e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u64,
    }

    #[test]
    fn test_bare_value() {
        let envelope = resolve::<Item>(br#"{"id": 1}"#, TargetShape::Single).unwrap();
        assert_eq!(envelope.data, Item { id: 1 });
        assert_eq!(envelope.found_key, "");
        assert!(!envelope.is_array);
    }

    #[test]
    fn test_bare_array() {
        let envelope =
            resolve::<Vec<Item>>(br#"[{"id": 1}, {"id": 2}]"#, TargetShape::Sequence).unwrap();
        assert_eq!(envelope.data.len(), 2);
        assert_eq!(envelope.found_key, "");
        assert!(envelope.is_array);
    }

    #[test]
    fn test_synonym_key() {
        let envelope = resolve::<Item>(br#"{"data": {"id": 1}}"#, TargetShape::Single).unwrap();
        assert_eq!(envelope.found_key, "data");
    }

    #[test]
    fn test_synonym_order_beats_document_order() {
        let bytes = br#"{"body": {"id": 2}, "result": {"id": 1}}"#;
        let envelope = resolve::<Item>(bytes, TargetShape::Single).unwrap();
        assert_eq!(envelope.found_key, "result");
        assert_eq!(envelope.data.id, 1);
    }

    #[test]
    fn test_failed_synonym_falls_through() {
        let bytes = br#"{"data": "oops", "payload": {"id": 4}}"#;
        let envelope = resolve::<Item>(bytes, TargetShape::Single).unwrap();
        assert_eq!(envelope.found_key, "payload");
    }

    #[test]
    fn test_unknown_key() {
        let envelope = resolve::<Item>(br#"{"foo": {"id": 1}}"#, TargetShape::Single).unwrap();
        assert_eq!(envelope.found_key, "foo");
    }

    #[test]
    fn test_unknown_keys_in_document_order() {
        let bytes = br#"{"zeta": {"id": 1}, "alpha": {"id": 2}}"#;
        let envelope = resolve::<Item>(bytes, TargetShape::Single).unwrap();
        assert_eq!(envelope.found_key, "zeta");
    }

    #[test]
    fn test_wrapped_sequence() {
        let bytes = br#"{"items": [{"id": 1}]}"#;
        let envelope = resolve::<Vec<Item>>(bytes, TargetShape::Sequence).unwrap();
        assert_eq!(envelope.found_key, "items");
        assert!(!envelope.is_array);
    }

    #[test]
    fn test_empty_object_fails() {
        let error = resolve::<Item>(b"{}", TargetShape::Single).unwrap_err();
        assert!(error.target.contains("Item"));
        assert_eq!(error.reason, "no key produced a valid decode");
    }

    #[test]
    fn test_not_json_fails() {
        let error = resolve::<Item>(b"<html>", TargetShape::Single).unwrap_err();
        assert!(error.reason.starts_with("response is not valid JSON"));
    }

    #[test]
    fn test_custom_decode_and_name() {
        let error = resolve_envelope(b"[]", TargetShape::Single, "Thing", |_| {
            Err::<(), _>("nope".to_string())
        })
        .unwrap_err();
        assert_eq!(error.target, "Thing");
    }
}
