//! Common test utilities for integration tests.
//!
//! - [`app_builder::TestAppBuilder`] - Axum apps that mirror `main.rs` wiring,
//!   with mock upstream clients injected
//! - [`http_mock::MockHttpServer`] - stub upstream HTTP APIs with `wiremock`
//! - [`fixtures`] - addresses and representatives used across tests

pub mod app_builder;
pub mod http_mock;

#[allow(dead_code)]
pub mod fixtures {
    use speakup_api::address::Address;
    use speakup_api::representatives::Representative;

    pub fn little_rock() -> Address {
        Address {
            name: "Pat Doe".into(),
            street: "500 Woodlane St".into(),
            city: "Little Rock".into(),
            state: "AR".into(),
            zip: "72201".into(),
        }
    }

    pub fn senator() -> Representative {
        Representative {
            name: "Jane Smith".into(),
            office: "AR State Senator District 15".into(),
            party: Some("Republican Party".into()),
            phones: Some(vec!["(501) 555-0100".into()]),
            emails: Some(vec!["jane.smith@senate.ar.gov".into()]),
            photo_url: None,
            channels: None,
        }
    }
}
