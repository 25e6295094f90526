//! Common test utilities for integration tests.
//!
//! Builds the full router in memory and drives it with `tower::ServiceExt`.

// Not every integration test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use domain::services::IssueRelay;
use feature_intake_api::{
    app::create_app,
    config::{Config, LoggingConfig, RelayConfig, ServerConfig},
};
use persistence::repositories::FeatureRequestRepository;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Test configuration with the relay disabled.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 60,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        relay: RelayConfig::default(),
    }
}

/// Relay configuration pointing at a test server.
pub fn relay_config(url: String, token: &str) -> RelayConfig {
    RelayConfig {
        url,
        token: token.to_string(),
        timeout_secs: 5,
        user_agent: "feature-intake-test".to_string(),
    }
}

/// Create a test application with an empty store.
pub fn create_test_app(relay: Option<Arc<dyn IssueRelay>>) -> Router {
    create_app(test_config(), FeatureRequestRepository::new(), relay)
}

/// A complete, valid JSON submission.
pub fn valid_submission(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Allow exporting requests as CSV",
        "acceptance_criteria": "A CSV file downloads with every request",
        "priority": "medium",
        "target_timeline": "Q3",
        "affected_components": "api, frontend",
        "example_usage": "Click Export on the list page",
        "technical_constraints": "No new services"
    })
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn raw_request(method: Method, uri: &str, content_type: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// URL-encoded form request.
pub fn form_request(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", encode_form_component(k), encode_form_component(v)))
        .collect::<Vec<_>>()
        .join("&");
    raw_request(
        Method::POST,
        uri,
        "application/x-www-form-urlencoded",
        &body,
    )
}

fn encode_form_component(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            b' ' => "+".to_string(),
            _ => format!("%{:02X}", b),
        })
        .collect()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

/// Parse response body as JSON.
pub async fn parse_response_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

pub async fn body_string(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Submit through the JSON API and return the parsed envelope.
pub async fn submit_json(app: &Router, body: Value) -> (axum::http::StatusCode, Value) {
    let response = send(app, json_request(Method::POST, "/api/submit", body)).await;
    let status = response.status();
    (status, parse_response_body(response).await)
}

/// Fetch the JSON listing's `data` array.
pub async fn list_json(app: &Router) -> Vec<Value> {
    let response = send(app, get_request("/api/requests")).await;
    let body = parse_response_body(response).await;
    body["data"].as_array().cloned().unwrap_or_default()
}
