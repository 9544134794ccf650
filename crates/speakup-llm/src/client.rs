//! HTTP client for OpenAI-compatible chat completions.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{CompletionRequest, CompletionResponse, ErrorEnvelope};

/// Errors that can occur when calling the completion API.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport failure or undecodable success body
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream returned a non-2xx status.
    ///
    /// `message` is the upstream's `error.message` when the body carried one.
    #[error("API error: {status} - {}", .message.as_deref().unwrap_or("<no message>"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// Successful response with no choices or no content
    #[error("completion response contained no message content")]
    EmptyResponse,
}

impl LlmError {
    /// Upstream HTTP status, when the failure carried one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::EmptyResponse => None,
        }
    }

    /// Upstream-provided error message, when present.
    #[must_use]
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Trait for chat-completion operations.
///
/// Returns the raw text of the first choice; interpreting that text is the
/// caller's business.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// `LlmClient` backed by an OpenAI-compatible HTTP API.
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    /// Create a client for `base_url` (e.g. `https://api.openai.com/v1`).
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a client with a custom `reqwest::Client` (timeouts, proxies).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(model = %request.model, temperature = request.temperature, "sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|e| e.error.message);
            tracing::warn!(status = status.as_u16(), body = %body, "completion API returned an error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{CompletionRequest, LlmClient, LlmError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted `LlmClient`.
    ///
    /// Configure the reply with `set_result` and inspect the requests that
    /// were sent with `calls()`.
    pub struct MockLlmClient {
        result: Mutex<Option<Result<String, LlmError>>>,
        calls: Mutex<Vec<CompletionRequest>>,
    }

    impl MockLlmClient {
        pub fn new() -> Self {
            Self {
                result: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Mock that answers the next call with `text`.
        pub fn replying(text: impl Into<String>) -> Self {
            let mock = Self::new();
            mock.set_result(Ok(text.into()));
            mock
        }

        /// Set the result for the next `complete` call.
        pub fn set_result(&self, result: Result<String, LlmError>) {
            *self.result.lock().unwrap() = Some(result);
        }

        /// All requests passed to `complete`.
        pub fn calls(&self) -> Vec<CompletionRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Default for MockLlmClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(request.clone());

            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(LlmError::EmptyResponse))
        }
    }
}
