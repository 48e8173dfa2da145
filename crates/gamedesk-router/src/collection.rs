//! Insertion-ordered route storage for one HTTP verb.
//!
//! Append-only at registration time, read-only during dispatch. Dispatch is
//! always a linear scan in registration order; there is no index and no
//! reordering.

use crate::route::CompiledRoute;

/// The ordered routes registered under a single verb.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    routes: Vec<CompiledRoute>,
}

impl RouteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route, preserving registration order.
    pub fn add(&mut self, route: CompiledRoute) {
        self.routes.push(route);
    }

    /// Iterates routes in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, CompiledRoute> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::HandlerSpec;
    use crate::pattern::compile;

    #[test]
    fn test_collection_preserves_insertion_order() {
        let mut collection = RouteCollection::new();
        for template in ["/a", "/b", "/c"] {
            collection.add(CompiledRoute::new(
                compile(template).unwrap(),
                HandlerSpec::parse("X\\Y::z").unwrap(),
            ));
        }

        let templates: Vec<&str> = collection
            .iter()
            .map(|r| r.pattern().template())
            .collect();
        assert_eq!(templates, vec!["/a", "/b", "/c"]);
        assert_eq!(collection.len(), 3);
    }
}
