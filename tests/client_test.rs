// ABOUTME: Integration tests for the Terra API client against a mock HTTP server
// ABOUTME: Verifies auth headers, query parameters, response shapes, cancellation, and shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::json;
use terra_client::{RequestConfig, Samples, TerraClient, TerraConfig, TerraError};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-api-key";
const DEV_ID: &str = "test-dev-id";

fn client_for(server: &MockServer) -> TerraClient {
    let config = TerraConfig::new(API_KEY, DEV_ID)
        .with_base_url(server.uri())
        .with_pool_size(2);
    TerraClient::new(config).unwrap()
}

fn sleep_body() -> serde_json::Value {
    json!({
        "status": "success",
        "type": "sleep",
        "user": {
            "user_id": "u-1",
            "provider": "OURA",
            "last_webhook_update": "2024-03-01T08:30:00+00:00"
        },
        "data": [
            {"metadata": {"start_time": "2024-02-29T22:00:00Z", "end_time": "2024-03-01T06:00:00Z"}},
            {"metadata": {"start_time": "2024-03-01T22:10:00Z", "end_time": "2024-03-02T06:40:00Z"}}
        ]
    })
}

// ============================================================================
// Requests
// ============================================================================

#[tokio::test]
async fn test_data_request_sends_headers_and_query() {
    let server = MockServer::start().await;
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

    Mock::given(method("GET"))
        .and(path("/sleep"))
        .and(header("X-API-Key", API_KEY))
        .and(header("dev-id", DEV_ID))
        .and(query_param("user_id", "u-1"))
        .and(query_param("start_date", start.timestamp().to_string()))
        .and(query_param("to_webhook", "true"))
        .and(query_param("retry_if_rate_limited", "false"))
        .and(query_param_is_missing("end_date"))
        .and(query_param_is_missing("with_samples"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sleep_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user = client.user_from_id("u-1");
    let result = client
        .get_sleep_default(&user, start, None)
        .unwrap()
        .await
        .unwrap();

    assert!(result.is_successful());
    assert_eq!(result.parsed_data().map(<[_]>::len), Some(2));
    assert_eq!(result.user().unwrap().provider.as_deref(), Some("OURA"));
}

#[tokio::test]
async fn test_request_options_are_sent() {
    let server = MockServer::start().await;
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap();

    Mock::given(method("GET"))
        .and(path("/activity"))
        .and(query_param("end_date", end.timestamp().to_string()))
        .and(query_param("to_webhook", "false"))
        .and(query_param("with_samples", "true"))
        .and(query_param("retry_if_rate_limited", "true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"type": "activity", "data": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = RequestConfig::default()
        .with_to_webhook(false)
        .with_samples(Samples::Include)
        .with_retry_if_rate_limited(true);
    let result = client
        .get_activity(&client.user_from_id("u-2"), start, Some(end), &options)
        .unwrap()
        .await
        .unwrap();

    assert_eq!(result.parsed_data().map(<[_]>::len), Some(0));
}

#[tokio::test]
async fn test_get_user_extracts_user_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/userInfo"))
        .and(query_param("user_id", "u-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "user": {"user_id": "u-9", "provider": "GARMIN", "reference_id": "ref-9"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.get_user("u-9").unwrap().await.unwrap();
    let user = result.first().unwrap();
    assert_eq!(user.user_id, "u-9");
    assert_eq!(user.reference_id.as_deref(), Some("ref-9"));
}

#[tokio::test]
async fn test_list_providers_parses_whole_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/integrations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "providers": ["GARMIN", "OURA", "WHOOP"],
            "sdk_providers": ["APPLE"]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.list_providers().unwrap().await.unwrap();
    assert_eq!(result.first().unwrap().providers.as_ref().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_deauthenticate_uses_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/auth/deauthenticateUser"))
        .and(query_param("user_id", "u-3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success", "message": "User deauthenticated"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .deauthenticate_user(&client.user_from_id("u-3"))
        .unwrap()
        .await
        .unwrap();
    assert!(result.parsed_data().is_none());
    assert_eq!(result.message(), Some("User deauthenticated"));
}

#[tokio::test]
async fn test_error_status_is_returned_as_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/athlete"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "error",
            "message": "User not found"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .get_athlete_default(&client.user_from_id("ghost"))
        .unwrap()
        .await
        .unwrap();
    assert_eq!(result.status_code(), 404);
    assert!(!result.is_successful());
    assert!(result.parsed_data().is_none());
    assert_eq!(result.message(), Some("User not found"));
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    let config = TerraConfig::new(API_KEY, DEV_ID)
        .with_base_url("http://127.0.0.1:1")
        .with_pool_size(1);
    let client = TerraClient::new(config).unwrap();
    let err = client.list_providers().unwrap().await.unwrap_err();
    assert!(matches!(err, TerraError::Transport { .. }));
}

// ============================================================================
// Call lifecycle
// ============================================================================

#[tokio::test]
async fn test_cancel_before_response_arrives() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/integrations"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"providers": []}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let call = client.list_providers().unwrap();
    assert!(call.cancel());
    assert!(call.is_cancelled());
    assert!(matches!(call.await, Err(TerraError::Cancelled)));
}

#[tokio::test]
async fn test_wait_timeout_expires_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/integrations"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"providers": []}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut call = client.list_providers().unwrap();
    let err = call
        .wait_timeout(Duration::from_millis(100))
        .await
        .unwrap_err();
    assert!(matches!(err, TerraError::Timeout { .. }));
    assert!(!call.is_done());
    call.cancel();
}

#[tokio::test]
async fn test_result_can_only_be_taken_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/integrations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"providers": ["OURA"]})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut call = client.list_providers().unwrap();
    assert!(call.wait_timeout(Duration::from_secs(5)).await.is_ok());
    assert!(matches!(
        call.wait_timeout(Duration::from_secs(5)).await,
        Err(TerraError::ResultConsumed)
    ));
}

#[tokio::test]
async fn test_calls_after_shutdown_are_rejected() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    assert!(client.shutdown());
    assert!(client.pool().is_shut_down());
    assert!(matches!(
        client.list_providers(),
        Err(TerraError::PoolShutDown)
    ));
}

#[test]
fn test_blocking_wait_outside_async_context() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/subscriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "users": [
                    {"user_id": "a", "provider": "OURA"},
                    {"user_id": "b", "provider": "GARMIN"},
                    {"provider": "missing id"}
                ]
            })))
            .mount(&server)
            .await;
        server
    });

    let client = client_for(&server);
    let result = client.get_all_users().unwrap().blocking_wait().unwrap();
    let ids: Vec<_> = result
        .parsed_data()
        .unwrap()
        .iter()
        .map(|u| u.user_id.as_str())
        .collect();
    assert_eq!(ids, ["a", "b"]);
}
