//! # GameDesk Router
//!
//! Route compilation and dispatch: declarative path templates compile into
//! anchored, case-insensitive matchers, register per HTTP verb in call
//! order, and an inbound (method, path) pair resolves to a handler
//! invocation with the extracted path parameters.
//!
//! Templates use placeholder tokens:
//! - `:string` matches lowercase letters and hyphens
//! - `:number` matches digits
//! - `:any` matches word characters and hyphens
//! - `{#name type}` binds the same tokens to a name (`{#id :number}`)
//!
//! Dispatch is strictly first-match-wins over registration order; there is
//! no priority or weighting. Handlers are plain closures installed under
//! `Namespace\Class::method` specs and resolved once at registration, so an
//! invalid declaration fails at startup rather than on the first request.
//!
//! ## Example
//!
//! ```
//! use gamedesk_router::Router;
//!
//! let mut router: Router<String> = Router::new();
//! router
//!     .register_handler("Guide\\Guide::show", |params| {
//!         format!("guide {}", params.get("id").unwrap_or_default())
//!     })
//!     .unwrap();
//! router
//!     .add_route("GET", "/guide/{#id :number}", "Guide\\Guide::show")
//!     .unwrap();
//!
//! assert_eq!(router.dispatch("GET", "/guide/42").unwrap(), "guide 42");
//! assert!(router.dispatch("GET", "/guide/intro").is_err());
//! ```
//!
//! Routes can also be declared next to their handlers as a static table and
//! registered in bulk; see [`RouteSource`] and [`route_table!`].

mod attribute;
mod collection;
mod error;
mod handler;
mod pattern;
mod route;
mod router;

pub use attribute::{RouteMetadata, RouteSource};
pub use collection::RouteCollection;
pub use error::RouterError;
pub use handler::{HandlerFn, HandlerRegistry, HandlerSpec};
pub use pattern::{compile, CompiledPattern, ParamSlot};
pub use route::{CompiledRoute, PathParams};
pub use router::{HttpVerb, Router};
