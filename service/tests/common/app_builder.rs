//! Test application builder that mirrors `main.rs` wiring.
//!
//! ```ignore
//! use crate::common::app_builder::TestAppBuilder;
//!
//! let civic = Arc::new(MockCivicClient::new());
//! let app = TestAppBuilder::with_mocks()
//!     .with_civic_client(civic.clone())
//!     .build();
//! // app.oneshot(...)
//! ```
//!
//! # Preset Builders
//!
//! - [`TestAppBuilder::minimal()`] - Health check only
//! - [`TestAppBuilder::with_mocks()`] - Full app with mock upstream clients

#![allow(dead_code)]

use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Router};
use speakup_api::{
    civic::{mock::MockCivicClient, CivicApiClient},
    config::{CampaignConfig, LlmConfig, SecurityHeadersConfig},
    email::{EmailComposer, ModelSettings},
    http::{build_security_headers, cors_layer, security_headers_middleware},
    representatives::RepresentativeResolver,
    rest::{self, ApiDoc, ServiceInfo},
};
use speakup_llm::{mock::MockLlmClient, LlmClient};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builder for test applications.
///
/// Upstream clients are `None` until set, which reproduces a deployment
/// with the corresponding API key unset.
pub struct TestAppBuilder {
    include_api: bool,
    include_health: bool,
    include_swagger: bool,
    civic_client: Option<Arc<dyn CivicApiClient>>,
    llm_client: Option<Arc<dyn LlmClient>>,
    campaign: CampaignConfig,
    environment: String,
    cors_origins: Option<Vec<String>>,
    security_headers: Option<SecurityHeadersConfig>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_api: false,
            include_health: false,
            include_swagger: false,
            civic_client: None,
            llm_client: None,
            campaign: CampaignConfig::default(),
            environment: "test".to_string(),
            cors_origins: None,
            security_headers: None,
        }
    }

    // =========================================================================
    // Preset Builders
    // =========================================================================

    /// Health check only.
    #[must_use]
    pub fn minimal() -> Self {
        Self::new().with_health()
    }

    /// Full app with default mock clients, CORS and security headers.
    #[must_use]
    pub fn with_mocks() -> Self {
        Self::new()
            .with_api()
            .with_health()
            .with_swagger()
            .with_civic_client(Arc::new(MockCivicClient::new()))
            .with_llm_client(Arc::new(MockLlmClient::new()))
            .with_cors(&["http://localhost:5173"])
            .with_security_headers_default()
    }

    // =========================================================================
    // Component Configuration
    // =========================================================================

    /// Include the `/api` routes.
    #[must_use]
    pub fn with_api(mut self) -> Self {
        self.include_api = true;
        self
    }

    #[must_use]
    pub fn with_health(mut self) -> Self {
        self.include_health = true;
        self
    }

    #[must_use]
    pub fn with_swagger(mut self) -> Self {
        self.include_swagger = true;
        self
    }

    #[must_use]
    pub fn with_civic_client(mut self, client: Arc<dyn CivicApiClient>) -> Self {
        self.civic_client = Some(client);
        self
    }

    /// Behave as if the civic API key were unset.
    #[must_use]
    pub fn without_civic_client(mut self) -> Self {
        self.civic_client = None;
        self
    }

    #[must_use]
    pub fn with_llm_client(mut self, client: Arc<dyn LlmClient>) -> Self {
        self.llm_client = Some(client);
        self
    }

    /// Behave as if the LLM API key were unset.
    #[must_use]
    pub fn without_llm_client(mut self) -> Self {
        self.llm_client = None;
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: &str) -> Self {
        self.environment = environment.to_string();
        self
    }

    /// Pass an empty slice to block all cross-origin requests, `&["*"]` to
    /// allow any.
    #[must_use]
    pub fn with_cors(mut self, origins: &[&str]) -> Self {
        self.cors_origins = Some(origins.iter().map(|s| (*s).to_string()).collect());
        self
    }

    #[must_use]
    pub fn with_security_headers_default(mut self) -> Self {
        self.security_headers = Some(SecurityHeadersConfig::default());
        self
    }

    #[must_use]
    pub fn with_security_headers(mut self, config: SecurityHeadersConfig) -> Self {
        self.security_headers = Some(config);
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Build the router with the same layer order as `main.rs`:
    /// routes, extensions, CORS, then security headers outermost.
    #[must_use]
    pub fn build(self) -> Router {
        let resolver = RepresentativeResolver::new(self.civic_client);
        let composer = EmailComposer::new(
            self.llm_client,
            ModelSettings::from(&LlmConfig::default()),
            self.campaign,
        );

        let mut app = Router::new();

        if self.include_api {
            app = app.nest("/api", rest::api_router());
        }

        if self.include_health {
            app = app.route("/health", get(rest::health_check));
        }

        if self.include_swagger {
            app = app.merge(
                SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
        }

        app = app
            .layer(Extension(Arc::new(resolver)))
            .layer(Extension(Arc::new(composer)))
            .layer(Extension(ServiceInfo {
                environment: self.environment,
            }));

        if let Some(origins) = self.cors_origins {
            app = app.layer(cors_layer(&origins));
        }

        if let Some(config) = self.security_headers {
            if config.enabled {
                let headers = build_security_headers(&config);
                app = app.layer(middleware::from_fn_with_state(
                    headers,
                    security_headers_middleware,
                ));
            }
        }

        app
    }
}
