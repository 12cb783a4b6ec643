// ABOUTME: Integration tests for response normalization into API results
// ABOUTME: Covers array tolerance, singular objects, missing keys, non-2xx bodies, and embedded users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serde::Deserialize;
use serde_json::json;
use terra_client::models::{Activity, Athlete, PartialUser, ProvidersResponse, Sleep, User};
use terra_client::{ApiResult, RawResponse, ResponseShape, TerraError};

#[derive(Debug, Deserialize, PartialEq)]
struct Point {
    x: i64,
}

fn ok_json(body: &serde_json::Value) -> RawResponse {
    RawResponse::json(200, body.to_string())
}

// ============================================================================
// Keyed extraction
// ============================================================================

#[test]
fn test_array_skips_elements_that_do_not_parse() {
    let raw = ok_json(&json!({"data": [{"x": 1}, {"bad": true}]}));
    let result: ApiResult<Point> =
        ApiResult::from_response(raw, ResponseShape::Field("data"), None).unwrap();

    assert!(result.is_successful());
    assert_eq!(result.parsed_data(), Some(&[Point { x: 1 }][..]));
    assert_eq!(result.raw_body()["data"].as_array().unwrap().len(), 2);
}

#[test]
fn test_array_of_only_bad_elements_yields_empty_list() {
    let raw = ok_json(&json!({"data": [{"bad": 1}, "nope", 3]}));
    let result: ApiResult<Point> =
        ApiResult::from_response(raw, ResponseShape::Field("data"), None).unwrap();
    assert_eq!(result.parsed_data(), Some(&[][..]));
}

#[test]
fn test_empty_array_is_present_but_empty() {
    let raw = ok_json(&json!({"data": []}));
    let result: ApiResult<Point> =
        ApiResult::from_response(raw, ResponseShape::Field("data"), None).unwrap();
    assert_eq!(result.parsed_data().map(<[Point]>::len), Some(0));
}

#[test]
fn test_missing_key_yields_no_parsed_data() {
    let raw = ok_json(&json!({"status": "success"}));
    let result: ApiResult<Point> =
        ApiResult::from_response(raw, ResponseShape::Field("data"), None).unwrap();
    assert!(result.parsed_data().is_none());
    assert_eq!(result.raw_body()["status"], "success");
}

#[test]
fn test_single_object_under_key_becomes_one_element() {
    let raw = ok_json(&json!({"athlete": {"first_name": "Ada", "age": 36}}));
    let result: ApiResult<Athlete> =
        ApiResult::from_response(raw, ResponseShape::Field("athlete"), None).unwrap();
    let athletes = result.into_parsed_data().unwrap();
    assert_eq!(athletes.len(), 1);
    assert_eq!(athletes[0].first_name.as_deref(), Some("Ada"));
    assert_eq!(athletes[0].age, Some(36));
}

#[test]
fn test_single_object_that_does_not_parse_fails_the_call() {
    let raw = ok_json(&json!({"data": {"x": "not a number"}}));
    let err = ApiResult::<Point>::from_response(raw, ResponseShape::Field("data"), None)
        .unwrap_err();
    match err {
        TerraError::BodyParsing { target, .. } => assert_eq!(target, "Point"),
        other => panic!("expected BodyParsing, got {other:?}"),
    }
}

#[test]
fn test_terra_records_tolerate_malformed_sub_blocks() {
    let raw = ok_json(&json!({
        "type": "sleep",
        "data": [
            {"metadata": {"start_time": "2024-01-01T22:00:00Z", "end_time": "2024-01-02T06:00:00Z"}},
            {"metadata": "not an object"}
        ]
    }));
    let result: ApiResult<Sleep> =
        ApiResult::from_response(raw, ResponseShape::Field("data"), None).unwrap();
    let nights = result.parsed_data().unwrap();
    assert_eq!(nights.len(), 1);
    assert!(nights[0].metadata.as_ref().unwrap().start_time.is_some());
    assert_eq!(result.response_type(), Some("sleep"));
}

#[test]
fn test_null_sample_lists_do_not_drop_records() {
    let raw = ok_json(&json!({
        "data": [{
            "metadata": {"start_time": "2024-01-01T22:00:00Z"},
            "heart_rate_data": {"detailed": {"hr_samples": null}}
        }]
    }));
    let result: ApiResult<Sleep> =
        ApiResult::from_response(raw, ResponseShape::Field("data"), None).unwrap();
    let nights = result.parsed_data().unwrap();
    assert_eq!(nights.len(), 1);
    let detailed = nights[0]
        .heart_rate_data
        .as_ref()
        .and_then(|hr| hr.detailed.as_ref())
        .unwrap();
    assert!(detailed.hr_samples.is_none());

    let raw = ok_json(&json!({"data": [{"movement_data": {"speed_samples": null}}]}));
    let result: ApiResult<Activity> =
        ApiResult::from_response(raw, ResponseShape::Field("data"), None).unwrap();
    assert_eq!(result.parsed_data().map(<[Activity]>::len), Some(1));
}

// ============================================================================
// Whole body and no-content shapes
// ============================================================================

#[test]
fn test_whole_body_is_the_element() {
    let raw = ok_json(&json!({
        "status": "success",
        "providers": ["GARMIN", "OURA"],
        "sdk_providers": ["APPLE"]
    }));
    let result: ApiResult<ProvidersResponse> =
        ApiResult::from_response(raw, ResponseShape::WholeBody, None).unwrap();
    let providers = result.first().unwrap();
    assert_eq!(
        providers.providers.as_deref(),
        Some(&["GARMIN".to_owned(), "OURA".to_owned()][..])
    );
    assert_eq!(providers.sdk_providers.as_ref().map(Vec::len), Some(1));
}

#[test]
fn test_no_content_keeps_raw_tree_only() {
    let raw = ok_json(&json!({"status": "success", "message": "User deauthenticated"}));
    let result: ApiResult<()> =
        ApiResult::from_response(raw, ResponseShape::NoContent, None).unwrap();
    assert!(result.parsed_data().is_none());
    assert_eq!(result.message(), Some("User deauthenticated"));
}

#[test]
fn test_no_content_ignores_embedded_user() {
    let raw = ok_json(&json!({"status": "success", "user": {"user_id": "u1"}}));
    let handle = PartialUser::new("u1");
    let result: ApiResult<()> =
        ApiResult::from_response(raw, ResponseShape::NoContent, Some(&handle)).unwrap();
    assert!(result.user().is_none());
    assert!(result.parsed_data().is_none());
    assert_eq!(result.raw_body()["user"]["user_id"], "u1");
}

// ============================================================================
// Status handling
// ============================================================================

#[test]
fn test_error_status_keeps_raw_body_without_parsing() {
    let raw = RawResponse::json(
        404,
        json!({"status": "error", "message": "User not found", "data": [{"x": 1}]}).to_string(),
    );
    let user = PartialUser::new("missing");
    let result: ApiResult<Point> =
        ApiResult::from_response(raw, ResponseShape::Field("data"), Some(&user)).unwrap();

    assert!(!result.is_successful());
    assert_eq!(result.status_code(), 404);
    assert!(result.parsed_data().is_none());
    assert!(result.user().is_none());
    assert_eq!(result.message(), Some("User not found"));
}

#[test]
fn test_missing_body_fails() {
    let err =
        ApiResult::<Point>::from_response(RawResponse::new(200, None), ResponseShape::WholeBody, None)
            .unwrap_err();
    assert!(matches!(err, TerraError::BodyMissing));
}

#[test]
fn test_body_that_is_not_json_fails() {
    let err = ApiResult::<Point>::from_response(
        RawResponse::json(500, "<html>gateway error</html>"),
        ResponseShape::Field("data"),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, TerraError::BodyMalformed { .. }));
}

// ============================================================================
// Embedded users
// ============================================================================

#[test]
fn test_embedded_user_extracted_with_context() {
    let raw = ok_json(&json!({
        "user": {
            "user_id": "u-123",
            "provider": "GARMIN",
            "last_webhook_update": "2024-03-01T08:30:00+00:00"
        },
        "data": []
    }));
    let mut handle = PartialUser::new("u-123");
    let result: ApiResult<Sleep> =
        ApiResult::from_response(raw, ResponseShape::Field("data"), Some(&handle)).unwrap();

    let user: &User = result.user().unwrap();
    assert_eq!(user.provider.as_deref(), Some("GARMIN"));

    assert!(handle.refresh_from(user));
    assert_eq!(handle.provider(), Some("GARMIN"));
    assert!(handle.last_webhook_update().is_some());
}

#[test]
fn test_embedded_user_that_does_not_parse_is_absent() {
    let raw = ok_json(&json!({"user": {"provider": "GARMIN"}, "data": [{"x": 2}]}));
    let handle = PartialUser::new("u-123");
    let result: ApiResult<Point> =
        ApiResult::from_response(raw, ResponseShape::Field("data"), Some(&handle)).unwrap();
    assert!(result.user().is_none());
    assert_eq!(result.parsed_data(), Some(&[Point { x: 2 }][..]));
}
