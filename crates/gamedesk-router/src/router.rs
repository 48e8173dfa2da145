//! Verb-keyed route registration and first-match-wins dispatch.

use std::fmt;

use tracing::{debug, trace};

use crate::attribute::RouteSource;
use crate::collection::RouteCollection;
use crate::error::RouterError;
use crate::handler::{HandlerRegistry, HandlerSpec};
use crate::pattern::compile;
use crate::route::{CompiledRoute, PathParams};

/// The HTTP verbs this router keeps tables for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
}

impl HttpVerb {
    pub const ALL: [HttpVerb; 2] = [HttpVerb::Get, HttpVerb::Post];

    /// Parses a verb case-insensitively. Anything outside the supported set
    /// is [`RouterError::InvalidVerb`].
    pub fn parse(verb: &str) -> Result<Self, RouterError> {
        match verb.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpVerb::Get),
            "POST" => Ok(HttpVerb::Post),
            _ => Err(RouterError::InvalidVerb(verb.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The route compilation and dispatch engine.
///
/// One insertion-ordered [`RouteCollection`] per supported verb plus a
/// handler registry. Generic over the handler return type `T` so the owning
/// layer decides what a dispatch produces.
///
/// Registration runs single-threaded at startup (`&mut self`); dispatch is a
/// read-only operation (`&self`) with no shared mutable state, safe for
/// concurrent use once the router is built. Construct one instance and hand
/// it to whatever owns the request loop.
pub struct Router<T> {
    get: RouteCollection,
    post: RouteCollection,
    handlers: HandlerRegistry<T>,
}

impl<T> Router<T> {
    pub fn new() -> Self {
        Self {
            get: RouteCollection::new(),
            post: RouteCollection::new(),
            handlers: HandlerRegistry::new(),
        }
    }

    /// Installs a handler closure under its spec.
    ///
    /// Handlers must be registered before any route references them;
    /// `add_route` validates the reference eagerly.
    pub fn register_handler<F>(&mut self, spec: &str, handler: F) -> Result<(), RouterError>
    where
        F: Fn(&PathParams) -> T + Send + Sync + 'static,
    {
        self.handlers.register(spec, handler)?;
        Ok(())
    }

    /// Compiles and registers a route under the given verb.
    ///
    /// The verb is normalized case-insensitively (unsupported verbs are
    /// [`RouterError::InvalidVerb`]), the handler spec is parsed and must
    /// already be registered, and the template is compiled. Any failure
    /// appends nothing; registration is atomic per route.
    pub fn add_route(
        &mut self,
        verb: &str,
        template: &str,
        handler_spec: &str,
    ) -> Result<(), RouterError> {
        let verb = HttpVerb::parse(verb)?;
        let handler = HandlerSpec::parse(handler_spec)?;
        if !self.handlers.contains(&handler) {
            return Err(RouterError::InvalidHandlerSpec {
                spec: handler_spec.to_string(),
                reason: "no handler registered under this spec".to_string(),
            });
        }
        let pattern = compile(template)?;

        debug!(verb = %verb, template, handler = %handler, "route registered");
        self.table_mut(verb).add(CompiledRoute::new(pattern, handler));
        Ok(())
    }

    /// Registers every route a [`RouteSource`] declares, in declaration
    /// order, through the same path as [`Router::add_route`].
    ///
    /// Calling this twice for the same source appends a second copy of each
    /// route; there is no duplicate detection, and the earlier copies keep
    /// winning because they were appended first.
    pub fn scan_and_register<S: RouteSource>(&mut self) -> Result<(), RouterError> {
        for metadata in S::routes() {
            self.add_route(metadata.verb, metadata.template, metadata.handler)?;
        }
        Ok(())
    }

    /// Resolves (method, path) to a handler invocation.
    ///
    /// The verb's table is scanned in registration order and the first route
    /// whose `verify` accepts the path wins; scanning stops there even if a
    /// later route would also match. An unknown method, an empty table, and
    /// an exhausted scan all fail the same way: [`RouterError::RouteNotFound`].
    pub fn dispatch(&self, method: &str, path: &str) -> Result<T, RouterError> {
        let not_found = || RouterError::RouteNotFound {
            method: method.to_ascii_uppercase(),
            path: path.to_string(),
        };

        let Ok(verb) = HttpVerb::parse(method) else {
            return Err(not_found());
        };
        let table = self.table(verb);
        if table.is_empty() {
            return Err(not_found());
        }

        for route in table.iter() {
            let Some(params) = route.verify(path) else {
                continue;
            };
            trace!(
                verb = %verb,
                path,
                template = route.pattern().template(),
                "route matched"
            );
            let handler = self.handlers.resolve(route.handler()).ok_or_else(|| {
                // add_route guarantees presence; surface a spec error rather
                // than panic if the invariant is ever broken.
                RouterError::InvalidHandlerSpec {
                    spec: route.handler().to_string(),
                    reason: "handler disappeared from registry".to_string(),
                }
            })?;
            return Ok(handler(&params));
        }

        Err(not_found())
    }

    /// The routes registered under a verb, in registration order.
    pub fn routes(&self, verb: HttpVerb) -> &RouteCollection {
        self.table(verb)
    }

    fn table(&self, verb: HttpVerb) -> &RouteCollection {
        match verb {
            HttpVerb::Get => &self.get,
            HttpVerb::Post => &self.post,
        }
    }

    fn table_mut(&mut self, verb: HttpVerb) -> &mut RouteCollection {
        match verb {
            HttpVerb::Get => &mut self.get,
            HttpVerb::Post => &mut self.post,
        }
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_parse_is_case_insensitive() {
        assert_eq!(HttpVerb::parse("get").unwrap(), HttpVerb::Get);
        assert_eq!(HttpVerb::parse("Post").unwrap(), HttpVerb::Post);
    }

    #[test]
    fn test_verb_parse_rejects_unsupported() {
        assert!(matches!(
            HttpVerb::parse("PATCH"),
            Err(RouterError::InvalidVerb(_))
        ));
    }

    #[test]
    fn test_add_route_requires_registered_handler() {
        let mut router: Router<String> = Router::new();
        let err = router
            .add_route("GET", "/x", "Missing\\Missing::index")
            .unwrap_err();
        assert!(matches!(err, RouterError::InvalidHandlerSpec { .. }));
        assert!(router.routes(HttpVerb::Get).is_empty());
    }

    #[test]
    fn test_add_route_is_atomic_on_compile_failure() {
        let mut router: Router<String> = Router::new();
        router
            .register_handler("Pages\\Pages::show", |_| String::new())
            .unwrap();
        let err = router
            .add_route("GET", "/x/{#id :number", "Pages\\Pages::show")
            .unwrap_err();
        assert!(matches!(err, RouterError::Compile { .. }));
        assert!(router.routes(HttpVerb::Get).is_empty());
    }
}
