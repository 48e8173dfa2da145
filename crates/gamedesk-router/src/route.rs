//! Compiled routes and extracted path parameters.
//!
//! `verify` is a pure function: a successful match returns the parameters as
//! an owned [`PathParams`] value and a failed match returns `None` without
//! touching any state. Nothing is stored on the route between requests, so a
//! single route instance can be matched concurrently from many threads.

use crate::handler::HandlerSpec;
use crate::pattern::CompiledPattern;

/// Parameters extracted from one successful match.
///
/// Values are kept in template order, one per placeholder; positions cover
/// every slot while names address only the `{#name type}` ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathParams {
    values: Vec<(Option<String>, String)>,
}

impl PathParams {
    /// Looks up a parameter by declared name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n.as_deref() == Some(name))
            .map(|(_, v)| v.as_str())
    }

    /// Looks up a parameter by template position, named or not.
    pub fn position(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(|(_, v)| v.as_str())
    }

    /// The ordered argument list for handler invocation.
    pub fn positional(&self) -> Vec<&str> {
        self.values.iter().map(|(_, v)| v.as_str()).collect()
    }

    /// Iterates (name, value) pairs in template order.
    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &str)> {
        self.values
            .iter()
            .map(|(n, v)| (n.as_deref(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One compiled route: an anchored matcher plus its handler spec.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pattern: CompiledPattern,
    handler: HandlerSpec,
}

impl CompiledRoute {
    pub fn new(pattern: CompiledPattern, handler: HandlerSpec) -> Self {
        Self { pattern, handler }
    }

    /// Matches the path against this route.
    ///
    /// On success the extracted parameters are returned as a value; each
    /// compile-time slot is read from its own capture group. On failure
    /// nothing changes anywhere; there is no per-route match state.
    pub fn verify(&self, path: &str) -> Option<PathParams> {
        let captures = self.pattern.regex().captures(path)?;

        let mut values = Vec::with_capacity(self.pattern.slots().len());
        for slot in self.pattern.slots() {
            // Every slot in this grammar is a mandatory group.
            let matched = captures.get(slot.group())?;
            values.push((slot.name().map(str::to_string), matched.as_str().to_string()));
        }
        Some(PathParams { values })
    }

    /// The immutable handler spec attached at registration.
    pub fn handler(&self) -> &HandlerSpec {
        &self.handler
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::compile;
    use pretty_assertions::assert_eq;

    fn route(template: &str) -> CompiledRoute {
        let pattern = compile(template).unwrap();
        let handler = HandlerSpec::parse("Example\\Pages::show").unwrap();
        CompiledRoute::new(pattern, handler)
    }

    #[test]
    fn test_verify_extracts_named_param() {
        let route = route("/example/{#id :number}");
        let params = route.verify("/example/45").unwrap();
        assert_eq!(params.get("id"), Some("45"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_verify_positions_cover_all_slots() {
        let route = route("/:string/{#id :number}");
        let params = route.verify("/john-doe/45").unwrap();
        assert_eq!(params.position(0), Some("john-doe"));
        assert_eq!(params.position(1), Some("45"));
        assert_eq!(params.get("id"), Some("45"));
        assert_eq!(params.positional(), vec!["john-doe", "45"]);
    }

    #[test]
    fn test_verify_failure_is_pure() {
        let route = route("/example/{#id :number}");
        assert!(route.verify("/example/abc").is_none());
        // A failed match leaves nothing behind; the next match is unaffected.
        let params = route.verify("/example/7").unwrap();
        assert_eq!(params.get("id"), Some("7"));
    }

    #[test]
    fn test_verify_no_params_for_static_route() {
        let route = route("/speed-dial");
        let params = route.verify("/speed-dial").unwrap();
        assert!(params.is_empty());
    }
}
