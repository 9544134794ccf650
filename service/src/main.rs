#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::sync::Arc;

use anyhow::Context;
use axum::{middleware, routing::get, Extension, Router};
use speakup_api::{
    config::Config,
    email::EmailComposer,
    http::{build_security_headers, cors_layer, security_headers_middleware},
    representatives::RepresentativeResolver,
    rest::{self, ApiDoc, ServiceInfo},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load and validate configuration first (fail-fast)
    let config = Config::load().context("loading configuration")?;

    let filter = EnvFilter::try_new(&config.logging.level)
        .with_context(|| format!("invalid logging.level '{}'", config.logging.level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "speakup-api starting up"
    );

    let resolver = RepresentativeResolver::from_config(&config.civic)
        .context("building civic API client")?;
    let composer = EmailComposer::from_config(&config.llm, config.campaign.clone())
        .context("building LLM client")?;

    if !resolver.is_configured() {
        tracing::warn!("civic API key not set, representative lookups will fail");
    }
    if !composer.is_configured() {
        tracing::warn!("LLM API key not set, email generation will fail");
    }
    tracing::info!(model = %config.llm.model, bill = %config.campaign.bill_name, "email composer ready");

    let mut app = Router::new()
        .nest("/api", rest::api_router())
        .route("/health", get(rest::health_check));

    if config.swagger.enabled {
        tracing::info!("Swagger UI enabled at /swagger-ui");
        app = app.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    let mut app = app
        .layer(Extension(Arc::new(resolver)))
        .layer(Extension(Arc::new(composer)))
        .layer(Extension(ServiceInfo {
            environment: config.environment.clone(),
        }))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors.allowed_origins));

    if config.security_headers.enabled {
        tracing::info!("Security headers enabled");
        let headers = build_security_headers(&config.security_headers);
        app = app.layer(middleware::from_fn_with_state(
            headers,
            security_headers_middleware,
        ));
    } else {
        tracing::info!("Security headers disabled");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
