//! URL templates with `:name` path parameters.
//!
//! A path parameter is a `:` followed by an identifier (`[A-Za-z_]` then
//! `[A-Za-z0-9_]*`). Everything else is literal text. Ports such as `:8080`
//! and the `://` of the scheme never match.
//!
//! Templates are tokenized once, so interpolation never confuses `:id` with a
//! longer name like `:idx` sharing its prefix.

use url::Url;

use crate::error::BuildError;
use crate::rest::errors::ResourceError;

/// Returns every path parameter token in `template`, colon included, in order
/// of appearance. Repeated tokens are returned once per occurrence.
///
/// The whole string is scanned, query string included.
///
/// # Example
///
/// ```rust
/// use declarative_rest::rest::extract_path_parameters;
///
/// assert_eq!(
///     extract_path_parameters("https://api.com/users/:userId/posts/:postId"),
///     vec![":userId", ":postId"]
/// );
/// assert!(extract_path_parameters("https://api.com/users").is_empty());
/// ```
#[must_use]
pub fn extract_path_parameters(template: &str) -> Vec<String> {
    tokenize(template)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Parameter(name) => Some(format!(":{name}")),
            Segment::Literal(_) => None,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Parameter(String),
}

const fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

const fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn tokenize(template: &str) -> Vec<Segment> {
    let bytes = template.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b':' && i + 1 < bytes.len() && is_ident_start(bytes[i + 1]) {
            let mut end = i + 2;
            while end < bytes.len() && is_ident_continue(bytes[end]) {
                end += 1;
            }
            if literal_start < i {
                segments.push(Segment::Literal(template[literal_start..i].to_string()));
            }
            segments.push(Segment::Parameter(template[i + 1..end].to_string()));
            literal_start = end;
            i = end;
        } else {
            i += 1;
        }
    }

    if literal_start < bytes.len() {
        segments.push(Segment::Literal(template[literal_start..].to_string()));
    }
    segments
}

/// A validated URL template.
///
/// # Example
///
/// ```rust
/// use declarative_rest::rest::PathTemplate;
///
/// let template = PathTemplate::parse("https://api.com/users/:id/posts/:idx").unwrap();
/// assert_eq!(template.parameters(), &["id".to_string(), "idx".to_string()]);
/// assert_eq!(
///     template.resolve(&["7", "2"]).unwrap(),
///     "https://api.com/users/7/posts/2"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
    parameters: Vec<String>,
}

impl PathTemplate {
    /// Validates `template` as an absolute URL and tokenizes it.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidUrl`] if the template does not parse as a URL.
    pub fn parse(template: &str) -> Result<Self, BuildError> {
        Url::parse(template).map_err(|e| BuildError::InvalidUrl {
            url: template.to_string(),
            reason: e.to_string(),
        })?;

        let segments = tokenize(template);
        let mut parameters: Vec<String> = Vec::new();
        for segment in &segments {
            if let Segment::Parameter(name) = segment {
                if !parameters.contains(name) {
                    parameters.push(name.clone());
                }
            }
        }

        Ok(Self {
            raw: template.to_string(),
            segments,
            parameters,
        })
    }

    /// The template as declared.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Distinct parameter names (without the colon) in order of first appearance.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Renders the template with `{name}` in place of every parameter.
    #[must_use]
    pub fn interpolation_template(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Parameter(name) => format!("{{{name}}}"),
            })
            .collect()
    }

    /// Substitutes positional arguments, one per distinct parameter.
    ///
    /// Values are inserted verbatim; every occurrence of a repeated parameter
    /// receives the same value.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathArgumentCount`] if `args` does not have
    /// exactly one value per distinct parameter.
    pub fn resolve(&self, args: &[&str]) -> Result<String, ResourceError> {
        if args.len() != self.parameters.len() {
            return Err(ResourceError::PathArgumentCount {
                template: self.raw.clone(),
                expected: self.parameters.len(),
                provided: args.len(),
            });
        }
        self.resolve_with(|name| {
            let index = self
                .parameters
                .iter()
                .position(|p| p == name)
                .unwrap_or_default();
            Ok(args[index].to_string())
        })
    }

    /// Substitutes each parameter with the value returned by `lookup`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `lookup`.
    pub fn resolve_with<F, E>(&self, mut lookup: F) -> Result<String, E>
    where
        F: FnMut(&str) -> Result<String, E>,
    {
        let mut url = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => url.push_str(text),
                Segment::Parameter(name) => url.push_str(&lookup(name)?),
            }
        }
        Ok(url)
    }
}
