//! Integration tests for `HttpCivicClient` against a stubbed upstream.

mod common;

use std::time::Duration;

use common::http_mock::MockHttpServer;
use serde_json::json;
use speakup_api::civic::{CivicApiClient, CivicApiError, HttpCivicClient, STATE_LEVEL};
use speakup_api::representatives::{state_legislators, ResolveError};

const ADDRESS: &str = "500 Woodlane St, Little Rock, AR 72201";

fn lookup_body() -> serde_json::Value {
    json!({
        "normalizedInput": {
            "line1": "500 Woodlane Street",
            "city": "Little Rock",
            "state": "AR",
            "zip": "72201"
        },
        "offices": [
            {"name": "Governor of Arkansas", "officialIndices": [0]},
            {"name": "AR State Senator District 15", "officialIndices": [1]},
            {"name": "AR State Representative District 34", "officialIndices": [2]}
        ],
        "officials": [
            {"name": "Governor Person"},
            {
                "name": "Jane Smith",
                "party": "Republican Party",
                "phones": ["(501) 555-0100"],
                "emails": ["jane.smith@senate.ar.gov"],
                "photoUrl": "https://example.com/jane.jpg",
                "channels": [{"type": "Twitter", "id": "janesmith"}]
            },
            {"name": "John Roe", "party": "Democratic Party"}
        ]
    })
}

#[tokio::test]
async fn test_lookup_sends_address_key_and_level() {
    let server = MockHttpServer::start().await;

    server
        .expect_get("/representatives")
        .with_query("address", ADDRESS)
        .with_query("key", "test-key")
        .with_query("levels", STATE_LEVEL)
        .respond_with_json(lookup_body())
        .expect_times(1)
        .mount()
        .await;

    let client = HttpCivicClient::new(server.url(), "test-key");
    let info = client
        .representatives_by_address(ADDRESS)
        .await
        .expect("should succeed");

    assert_eq!(info.offices.len(), 3);
    assert_eq!(info.officials.len(), 3);
    assert_eq!(
        info.normalized_input.expect("normalized").one_line(),
        "500 Woodlane Street, Little Rock, AR 72201"
    );
    server.verify().await;
}

#[tokio::test]
async fn test_lookup_result_filters_to_legislators() {
    let server = MockHttpServer::start().await;

    server
        .expect_get("/representatives")
        .respond_with_json(lookup_body())
        .mount()
        .await;

    let client = HttpCivicClient::new(server.url(), "test-key");
    let info = client
        .representatives_by_address(ADDRESS)
        .await
        .expect("should succeed");

    let keys: Vec<_> = state_legislators(info).iter().map(|r| r.key()).collect();
    assert_eq!(
        keys,
        vec![
            "Jane Smith|AR State Senator District 15",
            "John Roe|AR State Representative District 34"
        ]
    );
}

#[tokio::test]
async fn test_missing_arrays_decode_as_empty() {
    let server = MockHttpServer::start().await;

    server
        .expect_get("/representatives")
        .respond_with_json(json!({"kind": "civicinfo#representativeInfoResponse"}))
        .mount()
        .await;

    let client = HttpCivicClient::new(server.url(), "test-key");
    let info = client
        .representatives_by_address(ADDRESS)
        .await
        .expect("should succeed");

    assert!(info.offices.is_empty());
    assert!(info.officials.is_empty());
    assert!(info.normalized_input.is_none());
}

#[tokio::test]
async fn upstream_error_statuses_are_classified() {
    let cases = [
        (400u16, "Failed to parse address"),
        (403, "Method doesn't allow unregistered callers"),
        (500, "Backend Error"),
    ];

    for (status, detail) in cases {
        let server = MockHttpServer::start().await;
        server
            .expect_get("/representatives")
            .respond_with_status(status)
            .with_json_response(json!({"error": {"code": status, "message": detail}}))
            .mount()
            .await;

        let client = HttpCivicClient::new(server.url(), "test-key");
        let err = client
            .representatives_by_address(ADDRESS)
            .await
            .expect_err("should fail");

        match &err {
            CivicApiError::ApiError {
                status: got,
                message,
            } => {
                assert_eq!(*got, status);
                assert!(message.contains(detail), "status {status}: {message}");
            }
            other => panic!("status {status}: unexpected error {other:?}"),
        }

        let classified = ResolveError::from(err);
        match status {
            400 => assert!(matches!(classified, ResolveError::AddressRejected(_))),
            403 => assert!(matches!(classified, ResolveError::AccessDenied(_))),
            _ => assert!(matches!(classified, ResolveError::Upstream(_))),
        }
    }
}

#[tokio::test]
async fn test_timeout_is_request_error() {
    let server = MockHttpServer::start().await;

    server
        .expect_get("/representatives")
        .respond_with_json(lookup_body())
        .respond_with_delay(Duration::from_secs(5))
        .mount()
        .await;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .expect("client build");
    let client = HttpCivicClient::with_client(http_client, server.url(), "test-key");

    let err = client
        .representatives_by_address(ADDRESS)
        .await
        .expect_err("should time out");

    assert!(matches!(err, CivicApiError::Request(ref e) if e.is_timeout()));
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let server = MockHttpServer::start().await;

    server
        .expect_get("/representatives")
        .respond_with_json(lookup_body())
        .expect_times(1)
        .mount()
        .await;

    let client = HttpCivicClient::new(format!("{}/", server.url()), "test-key");
    client
        .representatives_by_address(ADDRESS)
        .await
        .expect("should succeed");
    server.verify().await;
}
