//! REST handlers and `OpenAPI` documentation.
//!
//! Every handler is total: failures, including undecodable request bodies,
//! come back in the endpoint's own response shape with `success: false`.

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::address::Address;
use crate::email::{EmailComposer, EmailGenerationRequest, EmailGenerationResponse};
use crate::representatives::{
    Channel, Representative, RepresentativeResolver, RepresentativesResponse,
};

/// Deployment facts reported by the diagnostic endpoint.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub environment: String,
}

/// Body of `GET /api/test` responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub google_civic_api_key_set: bool,
    pub openai_api_key_set: bool,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
}

/// `OpenAPI` documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SpeakUp Arkansas API",
        version = "1.0.0",
        description = "Find Arkansas state legislators by address and draft emails to them",
        license(name = "MIT")
    ),
    servers(
        (url = "/api", description = "REST API")
    ),
    paths(find_representatives, generate_email, diagnostics),
    components(schemas(
        Address,
        Channel,
        Representative,
        RepresentativesResponse,
        EmailGenerationRequest,
        EmailGenerationResponse,
        Diagnostics
    ))
)]
pub struct ApiDoc;

/// Routes mounted under `/api`.
///
/// Expects `Arc<RepresentativeResolver>`, `Arc<EmailComposer>` and
/// [`ServiceInfo`] as extensions.
#[must_use]
pub fn api_router() -> Router {
    Router::new()
        .route("/representatives", post(find_representatives))
        .route("/generate-email", post(generate_email))
        .route("/test", get(diagnostics))
}

/// Liveness probe.
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Find state legislators
///
/// Looks up the Arkansas state senators and representatives for a home address.
#[utoipa::path(
    post,
    path = "/representatives",
    tag = "Representatives",
    request_body = Address,
    responses(
        (status = 200, description = "Lookup completed; `success` is false when no legislators matched", body = RepresentativesResponse),
        (status = 400, description = "Missing fields or address not recognised", body = RepresentativesResponse),
        (status = 500, description = "Configuration or upstream failure", body = RepresentativesResponse)
    )
)]
pub async fn find_representatives(
    Extension(resolver): Extension<Arc<RepresentativeResolver>>,
    payload: Result<Json<Address>, JsonRejection>,
) -> (StatusCode, Json<RepresentativesResponse>) {
    let address = match payload {
        Ok(Json(address)) => address,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected representatives request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(RepresentativesResponse::failure(invalid_body_message(
                    &rejection,
                ))),
            );
        }
    };

    let (status, body) = RepresentativesResponse::from_outcome(resolver.resolve(&address).await);
    (status, Json(body))
}

/// Draft an email
///
/// Generates an email opposing the campaign bill, addressed to the selected
/// legislators.
#[utoipa::path(
    post,
    path = "/generate-email",
    tag = "Email",
    request_body = EmailGenerationRequest,
    responses(
        (status = 200, description = "Email drafted", body = EmailGenerationResponse),
        (status = 400, description = "No representatives selected or address incomplete", body = EmailGenerationResponse),
        (status = 500, description = "Configuration, upstream or parse failure; upstream error statuses are forwarded", body = EmailGenerationResponse)
    )
)]
pub async fn generate_email(
    Extension(composer): Extension<Arc<EmailComposer>>,
    payload: Result<Json<EmailGenerationRequest>, JsonRejection>,
) -> (StatusCode, Json<EmailGenerationResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected email request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(EmailGenerationResponse::failure(invalid_body_message(
                    &rejection,
                ))),
            );
        }
    };

    let (status, body) = EmailGenerationResponse::from_outcome(composer.compose(&request).await);
    (status, Json(body))
}

/// Configuration diagnostics
///
/// Reports which upstream credentials are set. Never reveals the values.
#[utoipa::path(
    get,
    path = "/test",
    tag = "System",
    responses(
        (status = 200, description = "Diagnostics", body = Diagnostics)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn diagnostics(
    Extension(resolver): Extension<Arc<RepresentativeResolver>>,
    Extension(composer): Extension<Arc<EmailComposer>>,
    Extension(info): Extension<ServiceInfo>,
) -> Json<Diagnostics> {
    Json(Diagnostics {
        google_civic_api_key_set: resolver.is_configured(),
        openai_api_key_set: composer.is_configured(),
        timestamp: Utc::now(),
        environment: info.environment,
    })
}

fn invalid_body_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Request body must be JSON (Content-Type: application/json)".to_string()
        }
        _ => "Invalid request body".to_string(),
    }
}
