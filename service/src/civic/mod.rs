//! Civic-data API client module.
//!
//! Looks up the elected officials for an address. Only state-level offices
//! are requested; narrowing to legislators happens in
//! [`crate::representatives`].
//!
//! # Architecture
//!
//! - [`CivicApiClient`] - Trait defining the lookup
//! - [`HttpCivicClient`] - Real HTTP implementation using reqwest
//! - [`mock::MockCivicClient`] - Mock for unit tests (behind `test-utils` feature)
//!
//! HTTP-level behaviour is covered in `tests/civic_client_tests.rs` with a
//! wiremock server standing in for the upstream.

mod client;
mod types;

pub use client::{CivicApiClient, CivicApiError, HttpCivicClient, STATE_LEVEL};
pub use types::{NormalizedInput, Office, Official, RepresentativeInfo, SocialChannel};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
