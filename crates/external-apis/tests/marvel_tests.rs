// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `MarvelClient`
//!
//! These tests use wiremock to mock the provider and check signing, paging,
//! normalization, retry and timeout behavior end to end.

use std::{collections::HashMap, time::Duration};

use api_client::{CharacterSource, FailureKind, HealthStatus, SourceError};
use external_apis::{MarvelClient, MarvelError, ProviderConfig, sign_at};
use serde_json::json;
use shared_types::Page;
use wiremock::{
    Mock, MockServer, Request, ResponseTemplate,
    matchers::{method, path, query_param},
};

use fixtures::*;

fn query_map(request: &Request) -> HashMap<String, String> {
    request.url.query_pairs().into_owned().collect()
}

/// Test listing with default paging and auth parameters
#[tokio::test]
async fn list_characters_sends_signed_paging_query() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("characters")))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "0"))
        .and(query_param("apikey", TEST_PUBLIC_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope_json(
            vec![character_json(1, "A-Bomb"), character_json(2, "Abyss")],
            0,
            20,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let characters = client.list_characters(Page::default()).await.unwrap();
    assert_eq!(characters.len(), 2);
    assert_eq!(characters[0].name, "A-Bomb");
    assert_eq!(characters[1].name, "Abyss");

    let requests = mock_server.received_requests().await.unwrap();
    let query = query_map(&requests[0]);
    let expected = sign_at(
        query["ts"].parse().unwrap(),
        TEST_PRIVATE_KEY,
        TEST_PUBLIC_KEY,
    );
    assert_eq!(query["hash"], expected.auth_token);
    assert!(!query.contains_key("nameStartsWith"));
    assert!(!query.values().any(|value| value == TEST_PRIVATE_KEY));
}

/// Test raw access defaults limit and offset
#[tokio::test]
async fn get_characters_defaults_paging() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();
    mount_ok(&mock_server, "characters", envelope_json(vec![], 0, 20)).await;

    let envelope = client.get_characters(None, None).await.unwrap();
    assert_eq!(envelope.paging_limit(), 20);
    assert!(envelope.results().is_empty());

    let requests = mock_server.received_requests().await.unwrap();
    let query = query_map(&requests[0]);
    assert_eq!(query["limit"], "20");
    assert_eq!(query["offset"], "0");
}

/// Test listing forwards the requested window
#[tokio::test]
async fn list_characters_forwards_page() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("characters")))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "40"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope_json(vec![], 40, 5)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let characters = client.list_characters(Page::new(40, 5)).await.unwrap();
    assert!(characters.is_empty());
}

/// Test search passes the prefix through
#[tokio::test]
async fn search_by_name_sends_name_prefix() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("characters")))
        .and(query_param("nameStartsWith", "Spider"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope_json(vec![spider_man_json()], 0, 10)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let characters = client
        .search_by_name("Spider", Page::new(0, 10))
        .await
        .unwrap();
    assert_eq!(characters.len(), 1);
    assert_eq!(characters[0].id, 1_009_610);
}

/// Test fetching and normalizing a single character
#[tokio::test]
async fn get_character_by_id_normalizes_record() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();
    mount_ok(
        &mock_server,
        "characters/1009610",
        envelope_json(vec![spider_man_json()], 0, 20),
    )
    .await;

    let character = client.get_character_by_id(1_009_610).await.unwrap();

    assert_eq!(character.id, 1_009_610);
    assert_eq!(character.name, "Spider-Man");
    assert_eq!(
        character.thumbnail_url.as_deref(),
        Some("http://i.annihil.us/u/prod/marvel/i/mg/3/50/526548a343e4b.jpg")
    );
    assert_eq!(
        character.comics,
        Some(vec![
            "Amazing Spider-Man (1963) #1".to_string(),
            "Spectacular Spider-Man (1976) #1".to_string()
        ])
    );
    assert_eq!(character.events, Some(vec!["Civil War".to_string()]));
    assert_eq!(
        character.urls,
        Some(vec![
            "detail: http://marvel.com/characters/54/spider-man".to_string()
        ])
    );

    let again = client.get_character_by_id(1_009_610).await.unwrap();
    assert_eq!(character, again);
}

/// Test provider 404 surfaces as not found without retries
#[tokio::test]
async fn get_character_by_id_not_found() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("characters/999999")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 404,
            "status": "We couldn't find that character"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client.get_character_by_id(999_999).await;
    assert_eq!(result, Err(SourceError::NotFound { id: 999_999 }));
}

/// Test an empty result list for an id is not found
#[tokio::test]
async fn get_character_by_id_empty_results_is_not_found() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();
    mount_ok(&mock_server, "characters/42", envelope_json(vec![], 0, 20)).await;

    let result = client.get_character_by_id(42).await;
    assert!(result.unwrap_err().is_not_found());
}

/// Test null results are an empty page for lists and not found for ids
#[tokio::test]
async fn null_results_are_empty() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();
    let body = json!({
        "code": 200,
        "status": "Ok",
        "data": { "offset": 0, "limit": 20, "total": 0, "count": 0, "results": null }
    });
    mount_ok(&mock_server, "characters", body.clone()).await;
    mount_ok(&mock_server, "characters/42", body).await;

    let characters = client.list_characters(Page::default()).await.unwrap();
    assert!(characters.is_empty());

    let result = client.get_character_by_id(42).await;
    assert_eq!(result, Err(SourceError::NotFound { id: 42 }));
}

/// Test a null data container decodes as an empty page
#[tokio::test]
async fn null_data_is_empty_page() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();
    mount_ok(
        &mock_server,
        "characters",
        json!({ "code": 200, "status": "Ok", "data": null }),
    )
    .await;

    let characters = client.search_by_name("Spi", Page::default()).await.unwrap();
    assert!(characters.is_empty());
}

/// Test null collection counters do not fail normalization
#[tokio::test]
async fn null_collection_counters_are_tolerated() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();

    let mut character = character_json(7, "Null Counters");
    character["comics"] = json!({
        "available": null,
        "returned": null,
        "items": [{ "name": "Untold Tales (1995) #1" }]
    });
    mount_ok(&mock_server, "characters/7", envelope_json(vec![character], 0, 20)).await;

    let record = client.get_character_by_id(7).await.unwrap();
    assert_eq!(record.comics, Some(vec!["Untold Tales (1995) #1".to_string()]));
}

/// Test 404 while listing is an outage, not a missing character
#[tokio::test]
async fn list_characters_404_is_unavailable() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("characters")))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let error = client.list_characters(Page::default()).await.unwrap_err();
    assert_eq!(
        error.failure_kind(),
        Some(FailureKind::ProviderHttp { status: 404 })
    );
}

/// Test 5xx answers are retried and each attempt is re-signed
#[tokio::test]
async fn server_errors_are_retried_until_success() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("characters")))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;
    mount_ok(
        &mock_server,
        "characters",
        envelope_json(vec![character_json(1, "A-Bomb")], 0, 20),
    )
    .await;

    let characters = client.list_characters(Page::default()).await.unwrap();
    assert_eq!(characters.len(), 1);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    for request in &requests {
        let query = query_map(request);
        let expected = sign_at(
            query["ts"].parse().unwrap(),
            TEST_PRIVATE_KEY,
            TEST_PUBLIC_KEY,
        );
        assert_eq!(query["hash"], expected.auth_token);
    }
}

/// Test retries stop after the configured count
#[tokio::test]
async fn server_errors_exhaust_retries() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("characters")))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(4)
        .mount(&mock_server)
        .await;

    let error = client.list_characters(Page::default()).await.unwrap_err();
    assert_eq!(
        error.failure_kind(),
        Some(FailureKind::ProviderHttp { status: 500 })
    );
}

/// Test zero retries means exactly one attempt
#[tokio::test]
async fn zero_retries_makes_single_attempt() {
    let mock_server = MockServer::start().await;
    let config = ProviderConfig {
        max_retries: 0,
        ..test_config(&mock_server)
    };
    let client = MarvelClient::new(&config).unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("characters")))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert!(client.list_characters(Page::default()).await.is_err());
}

/// Test 4xx answers are never retried
#[tokio::test]
async fn client_errors_are_not_retried() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("characters")))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "MissingParameter",
            "message": "You must provide a hash."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let error = client.list_characters(Page::default()).await.unwrap_err();
    assert_eq!(
        error.failure_kind(),
        Some(FailureKind::ProviderHttp { status: 409 })
    );
    assert!(error.to_string().contains("You must provide a hash."));
}

/// Test an undecodable body is an invalid response and is not retried
#[tokio::test]
async fn invalid_json_is_invalid_response() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("characters")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let error = client.list_characters(Page::default()).await.unwrap_err();
    assert_eq!(error.failure_kind(), Some(FailureKind::InvalidResponse));
}

/// Test records without a name fail normalization
#[tokio::test]
async fn record_without_name_fails_normalization() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();
    mount_ok(
        &mock_server,
        "characters",
        envelope_json(vec![character_json(1, "A-Bomb"), json!({ "id": 2 })], 0, 20),
    )
    .await;

    let error = client.list_characters(Page::default()).await.unwrap_err();
    assert_eq!(error.failure_kind(), Some(FailureKind::Normalization));
}

/// Test the deadline bounds a slow provider
#[tokio::test]
async fn slow_provider_times_out() {
    let mock_server = MockServer::start().await;
    let config = ProviderConfig {
        timeout_millis: 200,
        ..test_config(&mock_server)
    };
    let client = MarvelClient::new(&config).unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("characters")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope_json(vec![], 0, 20))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let started = std::time::Instant::now();
    let error = client.list_characters(Page::default()).await.unwrap_err();
    assert_eq!(error.failure_kind(), Some(FailureKind::Timeout));
    assert!(started.elapsed() < Duration::from_secs(2));
}

/// Test the raw API reports the deadline as a timeout error
#[tokio::test]
async fn raw_fetch_reports_timeout() {
    let mock_server = MockServer::start().await;
    let config = ProviderConfig {
        timeout_millis: 100,
        max_retries: 0,
        ..test_config(&mock_server)
    };
    let client = MarvelClient::new(&config).unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("characters/1")))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let error = client.get_character(1).await.unwrap_err();
    assert!(
        matches!(error, MarvelError::Timeout { millis: 100 })
            || matches!(&error, MarvelError::Http(e) if e.is_timeout()),
        "unexpected error: {error}"
    );
}

/// Test connection failures are reported as network errors after retries
#[tokio::test]
async fn unreachable_provider_is_network_failure() {
    let config = ProviderConfig {
        base_url: "http://127.0.0.1:1/v1/public".to_string(),
        max_retries: 1,
        initial_backoff_millis: 10,
        ..ProviderConfig::with_keys(TEST_PUBLIC_KEY, TEST_PRIVATE_KEY)
    };
    let client = MarvelClient::new(&config).unwrap();

    let error = client.list_characters(Page::default()).await.unwrap_err();
    assert_eq!(error.failure_kind(), Some(FailureKind::Network));
}

/// Test health check success
#[tokio::test]
async fn health_check_success() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("characters")))
        .and(query_param("limit", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope_json(vec![character_json(1, "A-Bomb")], 0, 1)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let health = client.health_check().await.unwrap();
    assert_eq!(health, HealthStatus::Up);
}

/// Test health check with rejected credentials
#[tokio::test]
async fn health_check_unauthorized() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("characters")))
        .respond_with(ResponseTemplate::new(401).set_body_json(invalid_credentials_json()))
        .mount(&mock_server)
        .await;

    let health = client.health_check().await.unwrap();
    assert!(health.is_down());
    assert_eq!(health.description(), "Authentication failed");
}

/// Test health check does not retry server errors
#[tokio::test]
async fn health_check_server_error_is_degraded() {
    let mock_server = MockServer::start().await;
    let client = MarvelClient::new(&test_config(&mock_server)).unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("characters")))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let health = client.health_check().await.unwrap();
    assert_eq!(
        health,
        HealthStatus::Degraded {
            reason: "API returned status 503".to_string()
        }
    );
}
