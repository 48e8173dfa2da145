// File: src/handlers.rs
// Purpose: Handler implementations and the route tables declared next to them

use gamedesk_router::{route_table, RouteMetadata, RouteSource, Router, RouterError};
use maud::{html, Markup, DOCTYPE};

/// Renders a full page shell around the body markup
fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (title) }
            }
            body {
                h1 { (title) }
                (body)
            }
        }
    }
    .into_string()
}

fn simple(title: &str, text: &str) -> String {
    page(title, html! { p { (text) } })
}

/// Internal dashboard pages; routes are registered by name at bootstrap
pub struct Internal;

/// Streaming overlay pages; routes declared in the table below
pub struct Stream;

impl RouteSource for Stream {
    fn routes() -> &'static [RouteMetadata] {
        route_table![
            "GET", "/stream" => "Stream\\Stream::index",
            "GET", "/stream-starting" => "Stream\\Stream::starting",
            "GET", "/stream-ending" => "Stream\\Stream::ending",
            "GET", "/stream-brb" => "Stream\\Stream::brb",
            "GET", "/stream-settings" => "Stream\\Stream::settings",
            "GET", "/stream/watch/{#id :number}" => "Stream\\Stream::watch",
            "GET", "/stream/create/{#id :number}-{#name :string}" => "Stream\\Stream::create",
        ]
    }
}

/// Maintenance tool pages; routes declared in the table below
pub struct Tools;

impl RouteSource for Tools {
    fn routes() -> &'static [RouteMetadata] {
        route_table![
            "GET", "/image-editor" => "Tools\\Tools::image_edit",
            "GET", "/back-up-database" => "Tools\\Tools::back_up_database",
            "GET", "/add-service" => "Tools\\Tools::add_service",
            "GET", "/remove-service" => "Tools\\Tools::remove_service",
            "GET", "/service-settings" => "Tools\\Tools::service_settings",
        ]
    }
}

/// Installs every handler closure; must run before any route registration
pub fn register(router: &mut Router<String>) -> Result<(), RouterError> {
    // Internal
    router.register_handler("Internal\\Internal::index", |_| {
        simple("Dashboard", "Welcome to GameDesk.")
    })?;
    router.register_handler("Internal\\Internal::speed_dial", |_| {
        simple("Speed dial", "Frequently used links.")
    })?;
    router.register_handler("Internal\\Internal::services", |_| {
        simple("Services", "Registered services.")
    })?;
    router.register_handler("Internal\\Internal::notes", |_| {
        simple("Notes", "Scratch notes.")
    })?;

    // Stream
    router.register_handler("Stream\\Stream::index", |_| {
        simple("Stream", "Stream overview.")
    })?;
    router.register_handler("Stream\\Stream::starting", |_| {
        simple("Starting soon", "The stream is starting soon.")
    })?;
    router.register_handler("Stream\\Stream::ending", |_| {
        simple("Ending", "The stream is ending.")
    })?;
    router.register_handler("Stream\\Stream::brb", |_| {
        simple("Be right back", "The stream will resume shortly.")
    })?;
    router.register_handler("Stream\\Stream::settings", |_| {
        simple("Stream settings", "Overlay configuration.")
    })?;
    router.register_handler("Stream\\Stream::watch", |params| {
        let id = params.get("id").unwrap_or_default();
        page(
            "Watch",
            html! { p { "Now playing stream " strong { (id) } "." } },
        )
    })?;
    router.register_handler("Stream\\Stream::create", |params| {
        let id = params.get("id").unwrap_or_default();
        let name = params.get("name").unwrap_or_default();
        page(
            "Create stream",
            html! { p { "Creating stream " strong { (name) } " with id " (id) "." } },
        )
    })?;

    // Tools
    router.register_handler("Tools\\Tools::image_edit", |_| {
        simple("Image edit", "Image editor.")
    })?;
    router.register_handler("Tools\\Tools::back_up_database", |_| {
        simple("Database backup", "Backing up the database.")
    })?;
    router.register_handler("Tools\\Tools::add_service", |_| {
        simple("Add service", "Add a service.")
    })?;
    router.register_handler("Tools\\Tools::remove_service", |_| {
        simple("Remove service", "Remove a service.")
    })?;
    router.register_handler("Tools\\Tools::service_settings", |_| {
        simple("Service settings", "Service configuration.")
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_declared_route_has_a_registered_handler() {
        let mut router: Router<String> = Router::new();
        register(&mut router).unwrap();
        router.scan_and_register::<Stream>().unwrap();
        router.scan_and_register::<Tools>().unwrap();
    }

    #[test]
    fn test_watch_page_renders_the_id() {
        let mut router: Router<String> = Router::new();
        register(&mut router).unwrap();
        router.scan_and_register::<Stream>().unwrap();

        let body = router.dispatch("GET", "/stream/watch/12").unwrap();
        assert!(body.contains("12"));
    }

    #[test]
    fn test_create_page_extracts_both_named_params() {
        let mut router: Router<String> = Router::new();
        register(&mut router).unwrap();
        router.scan_and_register::<Stream>().unwrap();

        let body = router.dispatch("GET", "/stream/create/7-launch-day").unwrap();
        assert!(body.contains("launch-day"));
        assert!(body.contains("7"));
    }
}
