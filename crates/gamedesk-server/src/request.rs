// File: src/request.rs
// Purpose: Inbound path cleaning before dispatch
//
// The route engine consumes a pre-normalized path; cleaning the raw request
// target is this layer's job. Query string and fragment are dropped, the
// path is reduced to its allowed character set (digits, letters, hyphens,
// slashes), and the configured base path prefix is stripped.

/// Characters that survive cleaning.
fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '/'
}

/// Cleans a raw request path for dispatch.
///
/// An empty result collapses to "/" so the root route stays reachable.
pub fn clean_path(raw: &str, base_path: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let sanitized: String = raw[..end].chars().filter(|c| is_allowed(*c)).collect();

    let stripped = if base_path.is_empty() {
        sanitized
    } else if let Some(rest) = sanitized.strip_prefix(base_path) {
        rest.to_string()
    } else {
        sanitized
    };

    if stripped.is_empty() {
        "/".to_string()
    } else if stripped.starts_with('/') {
        stripped
    } else {
        format!("/{stripped}")
    }
}
