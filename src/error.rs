//! Declaration-time error types.
//!
//! Building a [`ResourceDefinition`](crate::rest::ResourceDefinition) from a
//! schema and its directives either succeeds completely or fails with one of
//! these errors. No partial definition is ever produced.
//!
//! # Example
//!
//! ```rust
//! use declarative_rest::BuildError;
//! use declarative_rest::rest::PathTemplate;
//!
//! let result = PathTemplate::parse("not a url/:id");
//! assert!(matches!(result, Err(BuildError::InvalidUrl { .. })));
//! ```

use thiserror::Error;

use crate::rest::Verb;

/// Errors raised while turning a resource declaration into method definitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The URL template is not a syntactically valid absolute URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The template that failed to parse.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// More than one directive was declared for the same verb.
    #[error("Only one {verb} directive is allowed per resource, but {resource} declares several.")]
    DuplicateDirective {
        /// The resource name.
        resource: String,
        /// The verb declared twice.
        verb: Verb,
    },

    /// A path parameter of a write directive has no matching schema field.
    #[error(
        "Path parameter ':{property}' of the {verb} directive on {resource} has no matching \
         field. Path parameters of create/update/delete directives are resolved from the \
         model's own fields."
    )]
    MissingPathProperty {
        /// The resource name.
        resource: String,
        /// The verb whose template references the missing field.
        verb: Verb,
        /// The path parameter name with no matching field.
        property: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_message_includes_url() {
        let error = BuildError::InvalidUrl {
            url: "posts/:id".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("posts/:id"));
        assert!(message.contains("relative URL"));
    }

    #[test]
    fn test_duplicate_directive_message_names_verb() {
        let error = BuildError::DuplicateDirective {
            resource: "Post".to_string(),
            verb: Verb::GetOne,
        };
        let message = error.to_string();
        assert!(message.contains("get-one"));
        assert!(message.contains("Post"));
    }

    #[test]
    fn test_missing_path_property_names_property() {
        let error = BuildError::MissingPathProperty {
            resource: "Post".to_string(),
            verb: Verb::Update,
            property: "missing".to_string(),
        };
        assert!(error.to_string().contains(":missing"));
    }

    #[test]
    fn test_build_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BuildError>();
    }
}
