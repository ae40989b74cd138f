// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use workout_api::config::Config;
use workout_api::routes::create_router;
use workout_api::AppState;

pub const ANON_KEY: &str = "test-anon-key";
pub const SERVICE_KEY: &str = "test-service-role";
pub const GOOD_TOKEN: &str = "good-token";
pub const USER_ID: &str = "user-123";

/// Config pointing both upstreams at the mock server.
pub fn test_config(server: &MockServer) -> Config {
    Config {
        supabase_url: server.uri(),
        anon_key: ANON_KEY.to_string(),
        service_role_key: Some(SERVICE_KEY.to_string()),
        ..Config::test_default()
    }
}

/// Create a test app backed by the mock server.
pub fn create_test_app(server: &MockServer) -> axum::Router {
    create_test_app_with(test_config(server))
}

pub fn create_test_app_with(config: Config) -> axum::Router {
    let state = Arc::new(AppState::new(config).expect("state should build"));
    create_router(state)
}

/// Accept `GOOD_TOKEN` as `USER_ID`; anything else falls through to
/// wiremock's default 404.
pub async fn mount_identity(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header_eq("apikey", ANON_KEY))
        .and(header_eq("authorization", format!("Bearer {}", GOOD_TOKEN).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": USER_ID, "aud": "authenticated"})),
        )
        .mount(server)
        .await;
}

/// Build a request with optional bearer token and JSON body.
pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Requests received by the mock server under `/rest/v1/`.
pub async fn store_requests(server: &MockServer) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path().starts_with("/rest/v1/"))
        .collect()
}
