//! Declarative route metadata.
//!
//! Routes can be declared next to the handlers that serve them as a static
//! table of (verb, template, handler spec) records. A type exposes its table
//! through [`RouteSource`] and the router drains it with
//! `scan_and_register`, producing routes identical to explicit `add_route`
//! calls: same compilation, same ordering, same validation.

/// One declared route: verb, template, and the handler spec it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMetadata {
    pub verb: &'static str,
    pub template: &'static str,
    pub handler: &'static str,
}

/// A type that carries a route table for its handler methods.
pub trait RouteSource {
    /// The declared routes, in declaration order.
    fn routes() -> &'static [RouteMetadata];
}

/// Builds a static route table.
///
/// # Examples
///
/// ```
/// use gamedesk_router::{route_table, RouteMetadata, RouteSource};
///
/// struct Stream;
///
/// impl RouteSource for Stream {
///     fn routes() -> &'static [RouteMetadata] {
///         route_table![
///             "GET", "/stream" => "Stream\\Stream::index",
///             "GET", "/stream-settings" => "Stream\\Stream::settings",
///         ]
///     }
/// }
///
/// assert_eq!(Stream::routes().len(), 2);
/// assert_eq!(Stream::routes()[0].template, "/stream");
/// ```
#[macro_export]
macro_rules! route_table {
    ($($verb:literal, $template:literal => $handler:literal),* $(,)?) => {
        &[
            $(
                $crate::RouteMetadata {
                    verb: $verb,
                    template: $template,
                    handler: $handler,
                }
            ),*
        ]
    };
}
