//! Representative resolution: address in, state legislators out.
//!
//! The civic-data upstream returns two parallel arrays, `offices` and
//! `officials`, where each office refers to its holders by index. This module
//! joins them, keeps only state senators and state representatives, and
//! classifies every failure into a status and a user-facing message.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::address::Address;
use crate::civic::{CivicApiClient, CivicApiError, HttpCivicClient, RepresentativeInfo};
use crate::config::CivicConfig;

/// Office-name fragments that identify state legislators.
const LEGISLATIVE_OFFICES: [&str; 2] = ["State Senator", "State Representative"];

/// A social media handle for a representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Channel {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// A state legislator the visitor can write to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Representative {
    pub name: String,
    /// Office name as the upstream reports it, e.g. "AR State Senator District 15"
    pub office: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<Channel>>,
}

impl Representative {
    /// Identity key: `"{name}|{office}"`.
    ///
    /// The upstream has no stable ID, so selection and matching everywhere
    /// go through this key.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}|{}", self.name, self.office)
    }
}

/// Body of `POST /api/representatives` responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepresentativesResponse {
    pub representatives: Vec<Representative>,
    pub normalized_address: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RepresentativesResponse {
    /// Failure response with no representatives.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            representatives: Vec::new(),
            normalized_address: String::new(),
            success: false,
            error: Some(message.into()),
        }
    }

    /// Turn a resolver outcome into a status and body.
    #[must_use]
    pub fn from_outcome(outcome: Result<Resolution, ResolveError>) -> (StatusCode, Self) {
        match outcome {
            Ok(resolution) => (
                StatusCode::OK,
                Self {
                    representatives: resolution.representatives,
                    normalized_address: resolution.normalized_address,
                    success: true,
                    error: None,
                },
            ),
            Err(ResolveError::NoLegislators { normalized_address }) => (
                StatusCode::OK,
                Self {
                    normalized_address,
                    ..Self::failure(NO_LEGISLATORS_MESSAGE)
                },
            ),
            Err(err) => (err.status(), Self::failure(err.user_message())),
        }
    }
}

/// Successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub representatives: Vec<Representative>,
    pub normalized_address: String,
}

const NO_LEGISLATORS_MESSAGE: &str =
    "No state legislators were found for this address. Please verify that the address is in Arkansas.";

/// Why a lookup did not produce representatives.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("street, city, state and zip are required")]
    MissingFields,

    /// No civic API key configured
    #[error("civic API key is not configured")]
    NotConfigured,

    /// Lookup succeeded but no state legislators matched.
    #[error("no state legislators found")]
    NoLegislators { normalized_address: String },

    /// Upstream answered 400: it could not place the address
    #[error("address rejected by civic API: {0}")]
    AddressRejected(String),

    /// Upstream answered 403: key invalid or API disabled
    #[error("civic API access denied: {0}")]
    AccessDenied(String),

    #[error(transparent)]
    Upstream(CivicApiError),
}

impl From<CivicApiError> for ResolveError {
    fn from(err: CivicApiError) -> Self {
        match err {
            CivicApiError::ApiError {
                status: 400,
                message,
            } => Self::AddressRejected(message),
            CivicApiError::ApiError {
                status: 403,
                message,
            } => Self::AccessDenied(message),
            other => Self::Upstream(other),
        }
    }
}

impl ResolveError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::AddressRejected(_) => StatusCode::BAD_REQUEST,
            Self::NoLegislators { .. } => StatusCode::OK,
            Self::NotConfigured | Self::AccessDenied(_) | Self::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the visitor. Never includes upstream detail.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingFields => "All address fields are required",
            Self::NotConfigured => "API configuration error. Please contact the administrator.",
            Self::NoLegislators { .. } => NO_LEGISLATORS_MESSAGE,
            Self::AddressRejected(_) => {
                "Could not find representatives for the given address. Please check your address and try again."
            }
            Self::AccessDenied(_) => "API access denied. The service may be experiencing issues.",
            Self::Upstream(_) => "Failed to fetch representatives. Please try again.",
        }
    }

    /// True for failures an operator must fix, as opposed to bad input.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::NotConfigured | Self::AccessDenied(_))
    }
}

/// Looks up state legislators for an address.
///
/// Holds no client when the civic API key is unset; every lookup then fails
/// with [`ResolveError::NotConfigured`] without touching the network.
#[derive(Clone)]
pub struct RepresentativeResolver {
    client: Option<Arc<dyn CivicApiClient>>,
}

impl RepresentativeResolver {
    #[must_use]
    pub fn new(client: Option<Arc<dyn CivicApiClient>>) -> Self {
        Self { client }
    }

    /// Build from configuration, using the real HTTP client when a key is set.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &CivicConfig) -> Result<Self, reqwest::Error> {
        let client = match config.api_key() {
            Some(key) => {
                let http = reqwest::Client::builder()
                    .timeout(Duration::from_secs(config.timeout_secs))
                    .build()?;
                let client: Arc<dyn CivicApiClient> =
                    Arc::new(HttpCivicClient::with_client(http, &config.base_url, key));
                Some(client)
            }
            None => None,
        };
        Ok(Self::new(client))
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Resolve the state legislators for `address`.
    ///
    /// # Errors
    /// See [`ResolveError`] for the classification of each failure.
    pub async fn resolve(&self, address: &Address) -> Result<Resolution, ResolveError> {
        if !address.has_lookup_fields() {
            return Err(ResolveError::MissingFields);
        }

        let Some(client) = &self.client else {
            tracing::error!("civic API key is not set");
            return Err(ResolveError::NotConfigured);
        };

        let formatted = address.formatted();
        tracing::info!(address = %formatted, "looking up representatives");

        let info = client
            .representatives_by_address(&formatted)
            .await
            .map_err(|err| {
                let err = ResolveError::from(err);
                if err.is_configuration() {
                    tracing::error!(error = %err, "civic API refused the request");
                } else {
                    tracing::warn!(error = %err, "civic API lookup failed");
                }
                err
            })?;

        let normalized_address = info
            .normalized_input
            .as_ref()
            .map_or(formatted, |n| n.one_line());
        let representatives = state_legislators(info);

        tracing::info!(count = representatives.len(), "found representatives");

        if representatives.is_empty() {
            return Err(ResolveError::NoLegislators { normalized_address });
        }

        Ok(Resolution {
            representatives,
            normalized_address,
        })
    }
}

/// Join offices to officials and keep state legislators.
///
/// Output follows office order, then index order within an office.
/// Indices that point past the end of `officials` are skipped.
#[must_use]
pub fn state_legislators(info: RepresentativeInfo) -> Vec<Representative> {
    let RepresentativeInfo {
        offices, officials, ..
    } = info;
    let officials = &officials;

    offices
        .iter()
        .filter(|office| is_state_legislator(&office.name))
        .flat_map(|office| {
            office
                .official_indices
                .iter()
                .filter_map(move |&idx| officials.get(idx))
                .map(move |official| Representative {
                    name: official.name.clone(),
                    office: office.name.clone(),
                    party: official.party.clone(),
                    phones: official.phones.clone(),
                    emails: official.emails.clone(),
                    photo_url: official.photo_url.clone(),
                    channels: official.channels.as_ref().map(|channels| {
                        channels
                            .iter()
                            .map(|c| Channel {
                                kind: c.kind.clone(),
                                id: c.id.clone(),
                            })
                            .collect()
                    }),
                })
        })
        .collect()
}

fn is_state_legislator(office_name: &str) -> bool {
    LEGISLATIVE_OFFICES
        .iter()
        .any(|fragment| office_name.contains(fragment))
}
