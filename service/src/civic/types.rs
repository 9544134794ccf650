//! Data types for civic-data lookup responses.
//!
//! Field names follow the upstream JSON (`normalizedInput`, `officialIndices`,
//! `photoUrl`). Everything is optional or defaulted because the upstream omits
//! empty collections.

use serde::{Deserialize, Serialize};

/// Response from the representatives-by-address endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RepresentativeInfo {
    #[serde(default)]
    pub normalized_input: Option<NormalizedInput>,
    #[serde(default)]
    pub offices: Vec<Office>,
    #[serde(default)]
    pub officials: Vec<Official>,
}

/// The upstream's canonical form of the queried address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NormalizedInput {
    pub line1: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl NormalizedInput {
    /// `"{line1}, {city}, {state} {zip}"`
    #[must_use]
    pub fn one_line(&self) -> String {
        format!("{}, {}, {} {}", self.line1, self.city, self.state, self.zip)
    }
}

/// An elected office. Holders are referenced by position in `officials`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Office {
    pub name: String,
    #[serde(default)]
    pub official_indices: Vec<usize>,
}

/// A person holding one or more offices.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Official {
    pub name: String,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default)]
    pub phones: Option<Vec<String>>,
    #[serde(default)]
    pub emails: Option<Vec<String>>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub channels: Option<Vec<SocialChannel>>,
}

/// Social media handle, e.g. `{"type": "Twitter", "id": "SenJones"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialChannel {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}
