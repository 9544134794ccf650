//! Declarative HTTP stubbing for outbound upstream calls.
//!
//! ```ignore
//! use crate::common::http_mock::MockHttpServer;
//!
//! let server = MockHttpServer::start().await;
//! server
//!     .expect_get("/representatives")
//!     .with_query("key", "test-key")
//!     .respond_with_json(json!({"offices": [], "officials": []}))
//!     .mount()
//!     .await;
//! ```

#![allow(dead_code)]

use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

/// A local stub server standing in for an upstream API.
pub struct MockHttpServer {
    inner: MockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            inner: MockServer::start().await,
        }
    }

    /// Base URL of the server, without a trailing slash.
    pub fn url(&self) -> String {
        self.inner.uri()
    }

    /// Escape hatch for raw `wiremock` mocks.
    pub const fn inner(&self) -> &MockServer {
        &self.inner
    }

    pub fn expect_get(&self, route: &str) -> StubBuilder<'_> {
        StubBuilder::new(self, Mock::given(method("GET")).and(path(route)))
    }

    pub fn expect_post(&self, route: &str) -> StubBuilder<'_> {
        StubBuilder::new(self, Mock::given(method("POST")).and(path(route)))
    }

    /// Check `expect_times` expectations now instead of on drop.
    pub async fn verify(&self) {
        self.inner.verify().await;
    }

    /// Number of requests the server has seen.
    pub async fn request_count(&self) -> usize {
        self.inner
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}

/// Builder for a single stubbed route.
pub struct StubBuilder<'a> {
    server: &'a MockHttpServer,
    mock: MockBuilder,
    response: ResponseTemplate,
    times: Option<u64>,
}

impl<'a> StubBuilder<'a> {
    fn new(server: &'a MockHttpServer, mock: MockBuilder) -> Self {
        Self {
            server,
            mock,
            response: ResponseTemplate::new(200),
            times: None,
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.mock = self.mock.and(header(name, value));
        self
    }

    #[must_use]
    pub fn with_query(mut self, name: &'static str, value: &str) -> Self {
        self.mock = self.mock.and(query_param(name, value));
        self
    }

    #[must_use]
    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.response = self.response.set_body_json(body);
        self
    }

    #[must_use]
    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.response = ResponseTemplate::new(status);
        self
    }

    /// Body for a response whose status was set with `respond_with_status`.
    #[must_use]
    pub fn with_json_response(mut self, body: Value) -> Self {
        self.response = self.response.set_body_json(body);
        self
    }

    #[must_use]
    pub fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.response = self.response.set_delay(delay);
        self
    }

    #[must_use]
    pub fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    pub async fn mount(self) {
        let mock = self.mock.respond_with(self.response);
        let mock = match self.times {
            Some(times) => mock.expect(times),
            None => mock,
        };
        mock.mount(&self.server.inner).await;
    }
}
