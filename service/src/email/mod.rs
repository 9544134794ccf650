//! Email composition: selected representatives in, drafted email out.
//!
//! - [`prompt`] - prompt text sent to the model
//! - [`parse`] - strict-then-fallback reading of the model's reply
//! - [`format`] - recipient lists, salutations, signatures
//! - [`mailto`] - the `mailto:` link handed to the visitor's mail client
//!
//! Drafting is not idempotent; repeated requests produce different wording.

pub mod format;
pub mod mailto;
pub mod parse;
pub mod prompt;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use speakup_llm::{ChatMessage, CompletionRequest, LlmClient, LlmError, OpenAiClient};
use utoipa::ToSchema;

use crate::address::Address;
use crate::config::{CampaignConfig, LlmConfig};
use crate::representatives::Representative;

pub use format::{
    create_email_signature, extract_emails, format_rep_name, format_representatives_list,
    format_salutation,
};
pub use mailto::create_mailto_link;
pub use parse::{parse_email, EmailContent, EmailParseError};

const GENERIC_FAILURE: &str = "Failed to generate email with AI. Please try again.";

/// Body of `POST /api/generate-email` requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailGenerationRequest {
    /// The legislators the visitor selected
    pub representatives: Vec<Representative>,
    pub user_address: Address,
    /// Free-text narrative woven into the email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_story: Option<String>,
}

/// Body of `POST /api/generate-email` responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmailGenerationResponse {
    pub subject: String,
    pub body: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EmailGenerationResponse {
    /// Failure response with empty subject and body.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            subject: String::new(),
            body: String::new(),
            success: false,
            error: Some(message.into()),
        }
    }

    /// Turn a composer outcome into a status and body.
    #[must_use]
    pub fn from_outcome(outcome: Result<EmailContent, ComposeError>) -> (StatusCode, Self) {
        match outcome {
            Ok(EmailContent { subject, body }) => (
                StatusCode::OK,
                Self {
                    subject,
                    body,
                    success: true,
                    error: None,
                },
            ),
            Err(err) => (err.status(), Self::failure(err.user_message())),
        }
    }
}

/// Why an email could not be drafted.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("no representatives provided")]
    NoRepresentatives,

    /// `userAddress` absent or missing street, city, state or zip
    #[error("constituent address is incomplete")]
    MissingAddress,

    /// No LLM API key configured
    #[error("LLM API key is not configured")]
    NotConfigured,

    #[error(transparent)]
    Upstream(#[from] LlmError),

    #[error(transparent)]
    Unparseable(#[from] EmailParseError),
}

impl ComposeError {
    /// Upstream statuses are forwarded; anything else unclassified is a 500.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoRepresentatives | Self::MissingAddress => StatusCode::BAD_REQUEST,
            Self::Upstream(err) => err
                .status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::NotConfigured | Self::Unparseable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the visitor.
    ///
    /// Upstream API errors pass their own message through, since they
    /// describe the request (quota, model access) rather than internals.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NoRepresentatives => "No representatives provided".to_string(),
            Self::MissingAddress => "All address fields are required".to_string(),
            Self::NotConfigured => {
                "API configuration error. Please contact the administrator.".to_string()
            }
            Self::Upstream(err) => err
                .upstream_message()
                .unwrap_or(GENERIC_FAILURE)
                .to_string(),
            Self::Unparseable(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Model settings for a composer.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
}

impl From<&LlmConfig> for ModelSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }
}

/// Drafts an opposition email for the selected representatives.
///
/// Holds no client when the LLM API key is unset; every request then fails
/// with [`ComposeError::NotConfigured`] without touching the network.
#[derive(Clone)]
pub struct EmailComposer {
    client: Option<Arc<dyn LlmClient>>,
    settings: ModelSettings,
    campaign: CampaignConfig,
}

impl EmailComposer {
    #[must_use]
    pub fn new(
        client: Option<Arc<dyn LlmClient>>,
        settings: ModelSettings,
        campaign: CampaignConfig,
    ) -> Self {
        Self {
            client,
            settings,
            campaign,
        }
    }

    /// Build from configuration, using the OpenAI client when a key is set.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &LlmConfig, campaign: CampaignConfig) -> Result<Self, reqwest::Error> {
        let client = match config.api_key() {
            Some(key) => {
                let http = reqwest::Client::builder()
                    .timeout(Duration::from_secs(config.timeout_secs))
                    .build()?;
                let client: Arc<dyn LlmClient> =
                    Arc::new(OpenAiClient::with_client(http, &config.base_url, key));
                Some(client)
            }
            None => None,
        };
        Ok(Self::new(client, ModelSettings::from(config), campaign))
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// The completion request that would be sent for `request`.
    #[must_use]
    pub fn completion_request(&self, request: &EmailGenerationRequest) -> CompletionRequest {
        let prompt = prompt::build_prompt(
            &self.campaign,
            &request.representatives,
            &request.user_address,
            request.personal_story.as_deref(),
        );

        CompletionRequest::new(&self.settings.model, self.settings.temperature)
            .with_message(ChatMessage::system(prompt::SYSTEM_PROMPT))
            .with_message(ChatMessage::user(prompt))
    }

    /// Draft an email.
    ///
    /// # Errors
    /// See [`ComposeError`] for the classification of each failure.
    pub async fn compose(
        &self,
        request: &EmailGenerationRequest,
    ) -> Result<EmailContent, ComposeError> {
        if request.representatives.is_empty() {
            return Err(ComposeError::NoRepresentatives);
        }

        if !request.user_address.has_lookup_fields() {
            return Err(ComposeError::MissingAddress);
        }

        let Some(client) = &self.client else {
            tracing::error!("LLM API key is not set");
            return Err(ComposeError::NotConfigured);
        };

        tracing::info!(
            constituent = %prompt::constituent_name(&request.user_address),
            address = %request.user_address.formatted(),
            recipients = %format_representatives_list(&request.representatives),
            "generating email"
        );

        let completion = self.completion_request(request);
        let raw = client.complete(&completion).await.map_err(|err| {
            tracing::error!(error = %err, status = ?err.status(), "LLM request failed");
            err
        })?;

        tracing::info!("LLM response received");

        parse_email(&raw).map_err(|err| {
            tracing::error!(error = %err, "could not parse LLM response");
            ComposeError::Unparseable(err)
        })
    }
}
