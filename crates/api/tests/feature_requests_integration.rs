//! Integration tests for the JSON feature request API.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{
    body_string, create_test_app, get_request, json_request, list_json, parse_response_body,
    raw_request, send, submit_json, valid_submission,
};
use serde_json::json;

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn test_submit_feature_request_success() {
    let app = create_test_app(None);

    let (status, body) = submit_json(&app, valid_submission("CSV export")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Feature request submitted successfully");

    let data = &body["data"];
    assert_eq!(data["id"], 1);
    assert_eq!(data["title"], "CSV export");
    assert_eq!(data["priority"], "medium");
    assert_eq!(data["status"], "submitted");
    assert_eq!(data["target_timeline"], "Q3");
    assert_eq!(data["affected_components"], json!(["api", "frontend"]));
    assert!(data["created_at"].is_string());
}

#[tokio::test]
async fn test_ids_increase_from_one() {
    let app = create_test_app(None);

    for expected in 1..=5 {
        let (_, body) = submit_json(&app, valid_submission(&format!("Request {expected}"))).await;
        assert_eq!(body["data"]["id"], expected);
    }
}

#[tokio::test]
async fn test_components_are_normalized() {
    let app = create_test_app(None);
    let mut submission = valid_submission("Components");
    submission["affected_components"] = json!("a, b ,, c");

    let (_, body) = submit_json(&app, submission).await;
    assert_eq!(body["data"]["affected_components"], json!(["a", "b", "c"]));
}

#[tokio::test]
async fn test_absent_or_empty_components_yield_empty_list() {
    let app = create_test_app(None);

    let mut absent = valid_submission("Absent");
    absent.as_object_mut().unwrap().remove("affected_components");
    let (_, body) = submit_json(&app, absent).await;
    assert_eq!(body["data"]["affected_components"], json!([]));

    let mut empty = valid_submission("Empty");
    empty["affected_components"] = json!("");
    let (_, body) = submit_json(&app, empty).await;
    assert_eq!(body["data"]["affected_components"], json!([]));
}

#[tokio::test]
async fn test_missing_required_fields_rejected_without_mutation() {
    let app = create_test_app(None);
    submit_json(&app, valid_submission("Existing")).await;

    for field in ["title", "description", "acceptance_criteria", "priority"] {
        let mut absent = valid_submission("Absent field");
        absent.as_object_mut().unwrap().remove(field);
        let (status, body) = submit_json(&app, absent).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "absent {field}");
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Please fill in all required fields");
        assert!(body.get("data").is_none());

        let mut blank = valid_submission("Blank field");
        blank[field] = json!("   ");
        let (status, _) = submit_json(&app, blank).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "blank {field}");
    }

    assert_eq!(list_json(&app).await.len(), 1);

    // Rejections do not consume ids
    let (_, body) = submit_json(&app, valid_submission("Next")).await;
    assert_eq!(body["data"]["id"], 2);
}

#[tokio::test]
async fn test_unknown_priority_rejected() {
    let app = create_test_app(None);
    let mut submission = valid_submission("Urgent");
    submission["priority"] = json!("urgent");

    let (status, body) = submit_json(&app, submission).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Priority must be one of: high, medium, low");
    assert!(list_json(&app).await.is_empty());
}

#[tokio::test]
async fn test_priority_is_case_insensitive() {
    let app = create_test_app(None);
    let mut submission = valid_submission("Caps");
    submission["priority"] = json!("HIGH");

    let (status, body) = submit_json(&app, submission).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["priority"], "high");
}

#[tokio::test]
async fn test_invalid_json_rejected() {
    let app = create_test_app(None);

    let response = send(
        &app,
        raw_request(Method::POST, "/api/submit", "application/json", "{not json"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid JSON");
}

#[tokio::test]
async fn test_json_without_content_type_is_accepted() {
    let app = create_test_app(None);
    let body = valid_submission("No content type").to_string();

    let response = send(&app, raw_request(Method::POST, "/api/submit", "text/plain", &body)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_submit_wrong_method() {
    let app = create_test_app(None);

    let response = send(&app, get_request("/api/submit")).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let body = parse_response_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Method not allowed");
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_empty_store() {
    let app = create_test_app(None);

    let response = send(&app, get_request("/api/requests")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Feature requests retrieved successfully");
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_list_returns_submissions_in_order() {
    let app = create_test_app(None);
    let titles = ["First", "Second", "Third"];
    for title in titles {
        submit_json(&app, valid_submission(title)).await;
    }

    let listed = list_json(&app).await;
    assert_eq!(listed.len(), titles.len());
    for (i, (record, title)) in listed.iter().zip(titles).enumerate() {
        assert_eq!(record["title"], title);
        assert_eq!(record["id"], i as u64 + 1);
    }
}

#[tokio::test]
async fn test_list_wrong_method() {
    let app = create_test_app(None);

    let response = send(&app, json_request(Method::POST, "/api/requests", json!({}))).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Method not allowed");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submissions_get_distinct_ids() {
    let app = create_test_app(None);

    let mut handles = Vec::new();
    for i in 0..25 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let (_, body) = submit_json(&app, valid_submission(&format!("Concurrent {i}"))).await;
            body["data"]["id"].as_u64().unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=25).collect::<Vec<u64>>());
    assert_eq!(list_json(&app).await.len(), 25);
}

// ============================================================================
// Health, page, metrics
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(None);

    let response = send(&app, get_request("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn test_index_page() {
    let app = create_test_app(None);

    let response = send(&app, get_request("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(body_string(response).await.contains("/htmx/submit"));
}

#[tokio::test]
async fn test_request_id_header_is_set() {
    let app = create_test_app(None);

    let response = send(&app, get_request("/health")).await;
    assert!(response.headers().contains_key("x-request-id"));
}
