//! Civic-data API client for looking up elected officials by address.
//!
//! ```ignore
//! use speakup_api::civic::{CivicApiClient, HttpCivicClient};
//!
//! let client = HttpCivicClient::new("https://civicinfo.googleapis.com/civicinfo/v2", "my-key");
//! let info = client.representatives_by_address("500 Woodlane St, Little Rock, AR 72201").await?;
//! println!("{} offices", info.offices.len());
//! ```

use async_trait::async_trait;
use thiserror::Error;

use super::types::RepresentativeInfo;

/// Jurisdiction filter for state-level offices only.
pub const STATE_LEVEL: &str = "administrativeArea1";

/// Errors that can occur when calling the civic-data API.
#[derive(Debug, Error)]
pub enum CivicApiError {
    /// HTTP request failed or the body could not be decoded
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
}

/// Trait for civic-data lookups.
///
/// Use `HttpCivicClient` for real HTTP calls, or `mock::MockCivicClient`
/// in tests.
#[async_trait]
pub trait CivicApiClient: Send + Sync {
    /// Fetch state-level offices and officials for a one-line address.
    async fn representatives_by_address(
        &self,
        address: &str,
    ) -> Result<RepresentativeInfo, CivicApiError>;
}

/// HTTP-based implementation of `CivicApiClient`.
pub struct HttpCivicClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpCivicClient {
    /// Create a new client with the given base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a client with a custom `reqwest::Client` (for timeouts).
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
impl CivicApiClient for HttpCivicClient {
    async fn representatives_by_address(
        &self,
        address: &str,
    ) -> Result<RepresentativeInfo, CivicApiError> {
        let url = format!("{}/representatives", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("address", address),
                ("key", self.api_key.as_str()),
                ("levels", STATE_LEVEL),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CivicApiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
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

    use super::{CivicApiClient, CivicApiError, RepresentativeInfo};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock implementation of `CivicApiClient`.
    ///
    /// Configure the response with `set_result` and verify calls with
    /// `calls()`. Unconfigured calls return an empty lookup.
    pub struct MockCivicClient {
        result: Mutex<Option<Result<RepresentativeInfo, CivicApiError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockCivicClient {
        pub fn new() -> Self {
            Self {
                result: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the result for the next lookup.
        pub fn set_result(&self, result: Result<RepresentativeInfo, CivicApiError>) {
            *self.result.lock().unwrap() = Some(result);
        }

        /// All addresses passed to `representatives_by_address`.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Default for MockCivicClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl CivicApiClient for MockCivicClient {
        async fn representatives_by_address(
            &self,
            address: &str,
        ) -> Result<RepresentativeInfo, CivicApiError> {
            self.calls.lock().unwrap().push(address.to_string());

            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(RepresentativeInfo::default()))
        }
    }
}
