// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::path_regex;
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

async fn setup() -> MockServer {
    let server = MockServer::start().await;
    common::mount_identity(&server).await;
    Mock::given(path_regex("^/rest/v1/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_start_with_malformed_json() {
    let server = setup().await;

    let response = common::create_test_app(&server)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/workouts/start")
                .header(header::AUTHORIZATION, format!("Bearer {}", common::GOOD_TOKEN))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"template_id\": 12"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        common::json_body(response).await,
        json!({"error": "Request body must be a JSON object"})
    );
}

#[tokio::test]
async fn test_start_with_null_body() {
    let server = setup().await;

    let response = common::create_test_app(&server)
        .oneshot(common::request(
            "POST",
            "/api/workouts/start",
            Some(common::GOOD_TOKEN),
            Some(serde_json::Value::Null),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        common::json_body(response).await,
        json!({"error": "Request body required"})
    );
}

#[tokio::test]
async fn test_auth_checked_before_body() {
    let server = setup().await;

    let response = common::create_test_app(&server)
        .oneshot(common::request("POST", "/api/workouts/start", None, None))
        .await
        .unwrap();

    // No token: 401 wins over the missing body.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
