//! Cross-cutting HTTP layers shared by the server and the test app builder.

pub mod cors;
pub mod security;

pub use cors::cors_layer;
pub use security::{build_security_headers, security_headers_middleware};
