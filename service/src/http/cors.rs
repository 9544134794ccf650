//! CORS policy for the browser front end.

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Build the CORS layer for `origins`.
///
/// `"*"` anywhere in the list allows every origin. An empty list blocks all
/// cross-origin requests. Entries that are not valid header values are
/// dropped.
#[must_use]
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS allows any origin");
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        if parsed.is_empty() {
            tracing::info!("no CORS origins configured, cross-origin requests are blocked");
        } else {
            tracing::info!(origins = ?origins, "CORS origins configured");
        }
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(allow_origin)
}
