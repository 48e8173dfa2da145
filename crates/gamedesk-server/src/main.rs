mod config;
mod handlers;
mod request;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use gamedesk_router::{HttpVerb, Router, RouterError};
use tracing::{info, warn};

use crate::config::Config;

/// Application state shared across requests
#[derive(Clone)]
struct AppState {
    router: Arc<Router<String>>,
    base_path: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load_default().unwrap_or_else(|e| {
        warn!("failed to load config: {e}, using defaults");
        Config::default()
    });

    // Registration errors must keep the process from serving.
    let router = build_router().context("route registration failed")?;
    info!(
        get = router.routes(HttpVerb::Get).len(),
        post = router.routes(HttpVerb::Post).len(),
        "routes registered"
    );

    let state = AppState {
        router: Arc::new(router),
        base_path: config.routing.base_path.clone(),
    };

    let app = axum::Router::new().fallback(dispatch).with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds the process-wide router: handlers first, then the named routes and
/// the declarative tables, in bootstrap order
fn build_router() -> Result<Router<String>, RouterError> {
    let mut router = Router::new();
    handlers::register(&mut router)?;

    router.add_route("GET", "/", "Internal\\Internal::index")?;
    router.add_route("GET", "/internal", "Internal\\Internal::index")?;
    router.add_route("GET", "/speed-dial", "Internal\\Internal::speed_dial")?;
    router.add_route("GET", "/services", "Internal\\Internal::services")?;
    router.add_route("GET", "/notes", "Internal\\Internal::notes")?;

    router.scan_and_register::<handlers::Stream>()?;
    router.scan_and_register::<handlers::Tools>()?;
    Ok(router)
}

/// Funnels every inbound request through the route engine
async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let path = request::clean_path(req.uri().path(), &state.base_path);

    match state.router.dispatch(req.method().as_str(), &path) {
        Ok(body) => Html(body).into_response(),
        Err(e) if e.is_not_found() => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        Err(e) => {
            warn!("dispatch failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_router_serves_named_and_scanned_routes() {
        let router = build_router().unwrap();

        assert!(router.dispatch("GET", "/").is_ok());
        assert!(router.dispatch("GET", "/speed-dial").is_ok());
        assert!(router.dispatch("GET", "/stream").is_ok());
        assert!(router.dispatch("GET", "/image-editor").is_ok());
        assert!(router.dispatch("GET", "/stream/watch/12").is_ok());
        assert!(router.dispatch("GET", "/nope").unwrap_err().is_not_found());
        assert!(router.dispatch("POST", "/stream").unwrap_err().is_not_found());
    }
}
