//! Response security headers.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{
            CONTENT_SECURITY_POLICY, REFERRER_POLICY, STRICT_TRANSPORT_SECURITY,
            X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
        },
        HeaderMap, HeaderName, HeaderValue,
    },
    middleware::Next,
    response::Response,
};

use crate::config::SecurityHeadersConfig;

/// Headers added to every response, built once at startup.
///
/// Configured values that are not valid header values are skipped with a
/// warning. HSTS is only emitted when enabled.
#[must_use]
pub fn build_security_headers(config: &SecurityHeadersConfig) -> Arc<HeaderMap> {
    let hsts = config.hsts_enabled.then(|| {
        if config.hsts_include_subdomains {
            format!("max-age={}; includeSubDomains", config.hsts_max_age)
        } else {
            format!("max-age={}", config.hsts_max_age)
        }
    });

    let configured: [(HeaderName, Option<&str>); 5] = [
        (X_CONTENT_TYPE_OPTIONS, Some("nosniff")),
        (X_FRAME_OPTIONS, Some(config.frame_options.as_str())),
        (
            CONTENT_SECURITY_POLICY,
            Some(config.content_security_policy.as_str()),
        ),
        (REFERRER_POLICY, Some(config.referrer_policy.as_str())),
        (STRICT_TRANSPORT_SECURITY, hsts.as_deref()),
    ];

    let mut headers = HeaderMap::new();
    for (name, value) in configured {
        let Some(value) = value else { continue };
        match HeaderValue::from_str(value) {
            Ok(value) => {
                headers.insert(name, value);
            }
            Err(_) => tracing::warn!(header = %name, %value, "skipping invalid security header"),
        }
    }

    Arc::new(headers)
}

/// Copy the prebuilt headers onto every response.
///
/// Install with `middleware::from_fn_with_state(headers, security_headers_middleware)`
/// as the outermost layer.
pub async fn security_headers_middleware(
    State(headers): State<Arc<HeaderMap>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let response_headers = response.headers_mut();
    for (name, value) in headers.iter() {
        response_headers.insert(name.clone(), value.clone());
    }
    response
}
