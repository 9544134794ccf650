//! Constituent address and the Arkansas-only validation rule.
//!
//! The server handlers only require a well-formed address shape; the stricter
//! Arkansas rule in [`validate_arkansas_address`] runs on the client before
//! any request is made.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_aux::prelude::deserialize_default_from_null;
use utoipa::ToSchema;

/// Arkansas ZIP codes start with 71 or 72, with an optional +4 suffix.
#[allow(clippy::unwrap_used)] // literal pattern
static ARKANSAS_ZIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(71|72)[0-9]{3}(-[0-9]{4})?$").unwrap());

const ACCEPTED_STATES: [&str; 2] = ["AR", "ARKANSAS"];

/// A home address as entered by the visitor.
///
/// Every field defaults to empty, whether absent or `null`, so a partially
/// filled form still deserializes and can be rejected with a structured
/// response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Address {
    /// Constituent's name, used to sign the email
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub street: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub city: String,
    /// "AR" or "Arkansas"
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub state: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub zip: String,
}

impl Address {
    /// Single-line form sent upstream: `"{street}, {city}, {state} {zip}"`.
    #[must_use]
    pub fn formatted(&self) -> String {
        format!("{}, {}, {} {}", self.street, self.city, self.state, self.zip)
    }

    /// True when street, city, state and zip are all non-blank.
    ///
    /// `name` is not required here; see [`validate_arkansas_address`] for the
    /// stricter client-side rule.
    #[must_use]
    pub fn has_lookup_fields(&self) -> bool {
        [&self.street, &self.city, &self.state, &self.zip]
            .iter()
            .all(|f| !f.trim().is_empty())
    }
}

/// Why an address was rejected by [`validate_arkansas_address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Please fill out all address fields")]
    MissingFields,
    #[error("This tool is for Arkansas residents only")]
    NotArkansas,
    #[error("Please enter a valid Arkansas ZIP code")]
    InvalidZip,
}

/// Check that an address is complete and located in Arkansas.
///
/// Pure: no I/O, and the same input always gives the same answer.
///
/// # Errors
///
/// Returns the first failing rule, checked in order: missing
/// name/street/city/zip, state other than AR/Arkansas, ZIP outside the
/// 71xxx/72xxx range.
pub fn validate_arkansas_address(address: &Address) -> Result<(), AddressError> {
    let required = [&address.name, &address.street, &address.city, &address.zip];
    if required.iter().any(|f| f.trim().is_empty()) {
        return Err(AddressError::MissingFields);
    }

    let state = address.state.trim().to_uppercase();
    if !ACCEPTED_STATES.contains(&state.as_str()) {
        return Err(AddressError::NotArkansas);
    }

    if !ARKANSAS_ZIP.is_match(address.zip.trim()) {
        return Err(AddressError::InvalidZip);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn little_rock() -> Address {
        Address {
            name: "Pat Doe".into(),
            street: "500 Woodlane St".into(),
            city: "Little Rock".into(),
            state: "AR".into(),
            zip: "72201".into(),
        }
    }

    #[test]
    fn test_formatted_address() {
        assert_eq!(
            little_rock().formatted(),
            "500 Woodlane St, Little Rock, AR 72201"
        );
    }

    #[test]
    fn test_valid_address_passes() {
        assert_eq!(validate_arkansas_address(&little_rock()), Ok(()));
    }

    #[test]
    fn test_missing_name_rejected() {
        let mut address = little_rock();
        address.name = String::new();
        assert_eq!(
            validate_arkansas_address(&address),
            Err(AddressError::MissingFields)
        );
    }

    #[test]
    fn test_lookup_fields_do_not_require_name() {
        let mut address = little_rock();
        address.name = String::new();
        assert!(address.has_lookup_fields());
        address.state = "  ".into();
        assert!(!address.has_lookup_fields());
    }

    #[test]
    fn test_null_fields_deserialize_as_blank() {
        let address: Address = serde_json::from_value(serde_json::json!({
            "name": null,
            "street": "500 Woodlane St",
            "city": "Little Rock",
            "state": "AR",
            "zip": null
        }))
        .expect("null fields should deserialize");

        assert_eq!(address.zip, "");
        assert_eq!(address.name, "");
        assert!(!address.has_lookup_fields());
    }

    #[test]
    fn test_missing_fields_checked_before_state() {
        let mut address = little_rock();
        address.city = String::new();
        address.state = "TX".into();
        assert_eq!(
            validate_arkansas_address(&address),
            Err(AddressError::MissingFields)
        );
    }

    #[test]
    fn state_boundaries() {
        let cases = [
            ("AR", true, "abbreviation"),
            ("ar", true, "lowercase abbreviation"),
            ("Arkansas", true, "full name"),
            ("  arkansas ", true, "padded lowercase"),
            ("ARK", false, "partial"),
            ("TX", false, "other state"),
            ("Kansas", false, "suffix match"),
            ("", false, "empty"),
        ];

        for (state, should_pass, desc) in cases {
            let mut address = little_rock();
            address.state = state.into();
            let result = validate_arkansas_address(&address);
            assert_eq!(result.is_ok(), should_pass, "case '{desc}': {result:?}");
            if !should_pass {
                assert_eq!(result, Err(AddressError::NotArkansas), "case '{desc}'");
            }
        }
    }

    #[test]
    fn zip_boundaries() {
        let cases = [
            ("72201", true, "Little Rock"),
            ("71601", true, "Pine Bluff"),
            ("72201-1234", true, "zip+4"),
            ("73301", false, "Texas prefix"),
            ("70112", false, "Louisiana prefix"),
            ("7220", false, "four digits"),
            ("722011", false, "six digits"),
            ("72201-12", false, "short +4"),
            ("72201 1234", false, "space separator"),
            ("ab201", false, "letters"),
        ];

        for (zip, should_pass, desc) in cases {
            let mut address = little_rock();
            address.zip = zip.into();
            let result = validate_arkansas_address(&address);
            assert_eq!(result.is_ok(), should_pass, "case '{desc}': {result:?}");
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AddressError::NotArkansas.to_string(),
            "This tool is for Arkansas residents only"
        );
        assert_eq!(
            AddressError::InvalidZip.to_string(),
            "Please enter a valid Arkansas ZIP code"
        );
    }
}
