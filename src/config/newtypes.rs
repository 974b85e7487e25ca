//! Small value types shared by configuration and requests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single header or query parameter entry.
///
/// Lists of `KeyValue` are ordered and may contain the same key several
/// times; nothing in this crate deduplicates them.
///
/// # Example
///
/// ```rust
/// use declarative_rest::KeyValue;
///
/// let header = KeyValue::new("Authorization", "Bearer token123");
/// assert_eq!(header.key(), "Authorization");
/// assert_eq!(header.value(), "Bearer token123");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyValue {
    key: String,
    value: String,
}

impl KeyValue {
    /// Creates a new entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The `Content-Type: application/json` header.
    #[must_use]
    pub fn content_type_json() -> Self {
        Self::new("Content-Type", "application/json")
    }

    /// Returns the key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for KeyValue {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}
