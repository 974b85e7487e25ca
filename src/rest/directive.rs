//! Verbs and per-verb directives.
//!
//! A [`Directive`] binds one [`Verb`] of a resource to a URL template plus
//! static headers and query parameters. A resource declares at most one
//! directive per verb.

use std::fmt;

use crate::clients::HttpMethod;
use crate::config::KeyValue;

/// The operations a resource can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Fetch a single resource (GET).
    GetOne,
    /// Fetch a collection of resources (GET).
    GetMany,
    /// Create a resource from an instance (POST).
    Create,
    /// Update a resource from an instance (PUT).
    Update,
    /// Delete the resource an instance points at (DELETE).
    Delete,
}

impl Verb {
    /// Every verb, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::GetOne,
        Self::GetMany,
        Self::Create,
        Self::Update,
        Self::Delete,
    ];

    /// Returns the HTTP method used for this verb.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        match self {
            Self::GetOne | Self::GetMany => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the verb name as used in declarations and error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GetOne => "get-one",
            Self::GetMany => "get-many",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Returns the name of the generated method.
    #[must_use]
    pub const fn method_name(&self) -> &'static str {
        match self {
            Self::GetOne => "get_one",
            Self::GetMany => "get_many",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "remove",
        }
    }

    /// Returns `true` for verbs whose path parameters come from call arguments.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        matches!(self, Self::GetOne | Self::GetMany)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A per-verb declaration.
///
/// # Example
///
/// ```rust
/// use declarative_rest::rest::{Directive, Verb};
///
/// let directive = Directive::get_one("https://api.example.com/posts/:id")
///     .header("Accept", "application/json")
///     .query_param("expand", "author");
///
/// assert_eq!(directive.verb(), Verb::GetOne);
/// assert_eq!(directive.static_headers().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    verb: Verb,
    url_template: String,
    static_headers: Vec<KeyValue>,
    static_query_params: Vec<KeyValue>,
}

impl Directive {
    /// Creates a directive for `verb` with no static headers or query parameters.
    #[must_use]
    pub fn new(verb: Verb, url_template: impl Into<String>) -> Self {
        Self {
            verb,
            url_template: url_template.into(),
            static_headers: Vec::new(),
            static_query_params: Vec::new(),
        }
    }

    /// Shorthand for `Directive::new(Verb::GetOne, url)`.
    #[must_use]
    pub fn get_one(url_template: impl Into<String>) -> Self {
        Self::new(Verb::GetOne, url_template)
    }

    /// Shorthand for `Directive::new(Verb::GetMany, url)`.
    #[must_use]
    pub fn get_many(url_template: impl Into<String>) -> Self {
        Self::new(Verb::GetMany, url_template)
    }

    /// Shorthand for `Directive::new(Verb::Create, url)`.
    #[must_use]
    pub fn create(url_template: impl Into<String>) -> Self {
        Self::new(Verb::Create, url_template)
    }

    /// Shorthand for `Directive::new(Verb::Update, url)`.
    #[must_use]
    pub fn update(url_template: impl Into<String>) -> Self {
        Self::new(Verb::Update, url_template)
    }

    /// Shorthand for `Directive::new(Verb::Delete, url)`.
    #[must_use]
    pub fn delete(url_template: impl Into<String>) -> Self {
        Self::new(Verb::Delete, url_template)
    }

    /// Appends a static header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.static_headers.push(KeyValue::new(key, value));
        self
    }

    /// Appends a static query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.static_query_params.push(KeyValue::new(key, value));
        self
    }

    /// Returns the verb.
    #[must_use]
    pub const fn verb(&self) -> Verb {
        self.verb
    }

    /// Returns the raw URL template.
    #[must_use]
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Returns the static headers.
    #[must_use]
    pub fn static_headers(&self) -> &[KeyValue] {
        &self.static_headers
    }

    /// Returns the static query parameters.
    #[must_use]
    pub fn static_query_params(&self) -> &[KeyValue] {
        &self.static_query_params
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Verb>();
    assert_send_sync::<Directive>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_http_methods() {
        assert_eq!(Verb::GetOne.http_method(), HttpMethod::Get);
        assert_eq!(Verb::GetMany.http_method(), HttpMethod::Get);
        assert_eq!(Verb::Create.http_method(), HttpMethod::Post);
        assert_eq!(Verb::Update.http_method(), HttpMethod::Put);
        assert_eq!(Verb::Delete.http_method(), HttpMethod::Delete);
    }

    #[test]
    fn test_verb_names() {
        let names: Vec<&str> = Verb::ALL.iter().map(Verb::as_str).collect();
        assert_eq!(names, vec!["get-one", "get-many", "create", "update", "delete"]);
        assert_eq!(Verb::Delete.method_name(), "remove");
    }

    #[test]
    fn test_is_read() {
        assert!(Verb::GetOne.is_read());
        assert!(Verb::GetMany.is_read());
        assert!(!Verb::Create.is_read());
        assert!(!Verb::Delete.is_read());
    }

    #[test]
    fn test_directive_keeps_static_lists_in_order() {
        let directive = Directive::create("https://api.example.com/posts")
            .header("X-A", "1")
            .header("X-A", "2")
            .query_param("draft", "true");

        assert_eq!(directive.verb(), Verb::Create);
        assert_eq!(directive.url_template(), "https://api.example.com/posts");
        assert_eq!(
            directive.static_headers(),
            &[KeyValue::new("X-A", "1"), KeyValue::new("X-A", "2")]
        );
        assert_eq!(
            directive.static_query_params(),
            &[KeyValue::new("draft", "true")]
        );
    }
}
