//! Handler specs and the handler registry.
//!
//! A handler spec is a string of the form `Namespace\Class::method` or
//! `Namespace\Class\method`; both resolve to the same (type path, method
//! name) pair. Specs are parsed eagerly at registration so an unparseable
//! declaration aborts startup instead of surfacing on the first request.
//!
//! Dispatch by string name is modeled as a registry: handler closures are
//! installed under their canonical spec before routes reference them, and a
//! matched route's spec is a plain map lookup at request time.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::RouterError;
use crate::route::PathParams;

/// A parsed handler spec: target type path plus method name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerSpec {
    class: String,
    method: String,
}

impl HandlerSpec {
    /// Parses `Ns\Class::method` or `Ns\Class\method`.
    ///
    /// A leading `\` is trimmed. Fails with
    /// [`RouterError::InvalidHandlerSpec`] when no separator is present or
    /// either side is empty.
    pub fn parse(spec: &str) -> Result<Self, RouterError> {
        let trimmed = spec.trim_start_matches('\\');

        let (class, method) = if let Some(pair) = trimmed.rsplit_once("::") {
            pair
        } else if let Some(pair) = trimmed.rsplit_once('\\') {
            pair
        } else {
            return Err(invalid_spec(spec, "missing '::' or '\\' separator"));
        };

        if class.is_empty() {
            return Err(invalid_spec(spec, "empty class name"));
        }
        if method.is_empty() {
            return Err(invalid_spec(spec, "empty method name"));
        }

        Ok(Self {
            class: class.to_string(),
            method: method.to_string(),
        })
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

impl fmt::Display for HandlerSpec {
    /// Canonical form, always with the `::` separator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.class, self.method)
    }
}

/// A registered handler. Receives the extracted parameters of the matched
/// route and produces the dispatch result.
pub type HandlerFn<T> = Arc<dyn Fn(&PathParams) -> T + Send + Sync>;

/// Maps canonical handler specs to registered handler closures.
pub struct HandlerRegistry<T> {
    handlers: HashMap<HandlerSpec, HandlerFn<T>>,
}

impl<T> HandlerRegistry<T> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Parses the spec and installs a handler under its canonical form.
    /// Re-registering a spec replaces the previous handler.
    pub fn register<F>(&mut self, spec: &str, handler: F) -> Result<HandlerSpec, RouterError>
    where
        F: Fn(&PathParams) -> T + Send + Sync + 'static,
    {
        let parsed = HandlerSpec::parse(spec)?;
        self.handlers.insert(parsed.clone(), Arc::new(handler));
        Ok(parsed)
    }

    /// Looks up the handler registered under a parsed spec.
    pub fn resolve(&self, spec: &HandlerSpec) -> Option<&HandlerFn<T>> {
        self.handlers.get(spec)
    }

    pub fn contains(&self, spec: &HandlerSpec) -> bool {
        self.handlers.contains_key(spec)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T> Default for HandlerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid_spec(spec: &str, reason: &str) -> RouterError {
    RouterError::InvalidHandlerSpec {
        spec: spec.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_double_colon_separator() {
        let spec = HandlerSpec::parse("Internal\\Internal::index").unwrap();
        assert_eq!(spec.class(), "Internal\\Internal");
        assert_eq!(spec.method(), "index");
    }

    #[test]
    fn test_parse_backslash_separator_is_equivalent() {
        let a = HandlerSpec::parse("Internal\\Internal::index").unwrap();
        let b = HandlerSpec::parse("Internal\\Internal\\index").unwrap();
        assert_eq!(a, b);
        assert_eq!(b.to_string(), "Internal\\Internal::index");
    }

    #[test]
    fn test_parse_trims_leading_backslash() {
        let spec = HandlerSpec::parse("\\Tools\\Tools::image_edit").unwrap();
        assert_eq!(spec.class(), "Tools\\Tools");
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert!(HandlerSpec::parse("index").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_sides() {
        assert!(HandlerSpec::parse("::index").is_err());
        assert!(HandlerSpec::parse("Internal::").is_err());
        // After trimming the leading backslash nothing remains of the class.
        assert!(HandlerSpec::parse("\\::index").is_err());
    }

    #[test]
    fn test_registry_resolves_registered_handler() {
        let mut registry: HandlerRegistry<String> = HandlerRegistry::new();
        let spec = registry
            .register("Pages\\Pages::show", |params| {
                format!("page {}", params.position(0).unwrap_or_default())
            })
            .unwrap();

        assert!(registry.contains(&spec));
        let handler = registry.resolve(&spec).unwrap();
        assert_eq!(handler(&PathParams::default()), "page ");
    }
}
