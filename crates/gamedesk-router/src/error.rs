//! Error taxonomy for route registration and dispatch.
//!
//! Registration-time errors (`Compile`, `InvalidVerb`, `InvalidHandlerSpec`)
//! indicate a programming error in route declarations and should prevent the
//! application from reaching a serving state. `RouteNotFound` is the only
//! error expected during normal operation; callers translate it into a
//! not-found response.

use thiserror::Error;

/// Errors produced by the router core.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The route template could not be compiled into a matcher.
    #[error("invalid route template {template:?}: {reason}")]
    Compile { template: String, reason: String },

    /// The HTTP verb passed to registration is not supported.
    #[error("unsupported HTTP verb {0:?}")]
    InvalidVerb(String),

    /// No table exists for the verb, or no registered route matched the path.
    /// Both failure shapes are deliberately one error kind.
    #[error("no route found for {method} {path}")]
    RouteNotFound { method: String, path: String },

    /// The handler spec string could not be parsed, or no handler was
    /// registered under it at the time the route was declared.
    #[error("invalid handler spec {spec:?}: {reason}")]
    InvalidHandlerSpec { spec: String, reason: String },
}

impl RouterError {
    /// True for the one error kind that is expected during normal dispatch.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RouterError::RouteNotFound { .. })
    }
}
