use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn submit_route_returns_created_receipt() {
    let store = Arc::new(MemoryStore::default());
    let app = application_router_with_store(store.clone());

    let response = app
        .oneshot(post_json("/api/v1/scholarships", &form_payload()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["id"], "doc-0001");
    assert_eq!(body["score"], 78);
    assert_eq!(body["tier"], "good");
    assert_eq!(store.documents()[0].2.record().image_names, vec!["certificate.png"]);
}

#[tokio::test]
async fn submit_route_returns_unprocessable_for_invalid_field() {
    let store = Arc::new(MemoryStore::default());
    let app = application_router_with_store(store.clone());
    let mut payload = form_payload();
    payload["answers"]["phone"] = json!("123456789");

    let response = app
        .oneshot(post_json("/api/v1/scholarships", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["field"], "phone");
    assert_eq!(body["rule"], "phone");
    assert_eq!(body["error"], "Số điện thoại phải có 10-11 số và bắt đầu bằng 0");
    assert!(store.documents().is_empty());
}

#[tokio::test]
async fn submit_route_rejects_a_post_without_answers() {
    let store = Arc::new(MemoryStore::default());
    let app = application_router_with_store(store.clone());

    let response = app
        .oneshot(post_json("/api/v1/scholarships", &json!({ "answers": {} })))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["field"], "fullName");
    assert_eq!(body["rule"], "required");
    assert!(store.documents().is_empty());
}

#[tokio::test]
async fn submit_route_ignores_client_field_definitions() {
    let store = Arc::new(MemoryStore::default());
    let app = application_router_with_store(store.clone());
    let mut payload = form_payload();
    payload["answers"]["agreement"] = json!(false);
    payload["fields"] = json!([
        { "name": "agreement", "value": { "kind": "boolean", "value": false }, "required": false }
    ]);

    let response = app
        .oneshot(post_json("/api/v1/scholarships", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["field"], "agreement");
    assert_eq!(body["rule"], "agreement");
    assert_eq!(body["error"], "Bạn phải đồng ý với cam kết");
    assert!(store.documents().is_empty());
}

#[tokio::test]
async fn submit_route_treats_mistyped_required_answers_as_empty() {
    let store = Arc::new(MemoryStore::default());
    let app = application_router_with_store(store.clone());
    let mut payload = form_payload();
    payload["answers"]["agreement"] = json!("yes");

    let response = app
        .oneshot(post_json("/api/v1/scholarships", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["field"], "agreement");
    assert!(store.documents().is_empty());
}

#[tokio::test]
async fn submit_route_returns_bad_gateway_on_store_failure() {
    let app = application_router_with_store(Arc::new(UnavailableStore));

    let response = app
        .oneshot(post_json("/api/v1/scholarships", &form_payload()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = read_json_body(response).await;
    assert_eq!(
        body["error"],
        "Failed to get document because the client is offline."
    );
}

#[tokio::test]
async fn validate_route_returns_verdict() {
    let app = application_router_with_store(Arc::new(MemoryStore::default()));
    let payload = json!({
        "name": "studentId",
        "value": { "kind": "text", "value": "A1234" },
        "required": true
    });

    let response = app
        .oneshot(post_json("/api/v1/scholarships/validate", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["valid"], false);
    assert_eq!(body["rule"], "student_id");
    assert_eq!(body["message"], "Mã SV phải có dạng XX1234 (2 chữ + số)");
}

#[tokio::test]
async fn validate_route_uses_the_form_required_flag() {
    let app = application_router_with_store(Arc::new(MemoryStore::default()));
    let payload = json!({
        "name": "agreement",
        "value": { "kind": "boolean", "value": false },
        "required": false
    });

    let response = app
        .oneshot(post_json("/api/v1/scholarships/validate", &payload))
        .await
        .expect("router responds");

    let body = read_json_body(response).await;
    assert_eq!(body["valid"], false);
    assert_eq!(body["rule"], "agreement");
}

#[tokio::test]
async fn score_route_accepts_numeric_answers() {
    let app = application_router_with_store(Arc::new(MemoryStore::default()));
    let payload = json!({
        "gpa": 3.6,
        "rank": "excellent",
        "income": 2500000,
        "situations": ["rural_area", "single_parent"],
        "achievements": ["Olympiad gold", "ICPC regional finalist", "Dean's list 2023"],
        "evidences": ["https://drive.google.com/file/d/olympiad", "https://example.edu.vn/icpc/2024"],
        "agreement": true
    });

    let response = app
        .oneshot(post_json("/api/v1/scholarships/score", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["score"], 78);
    assert_eq!(body["tier"], "good");
}

#[tokio::test]
async fn score_route_returns_breakdown() {
    let app = application_router_with_store(Arc::new(MemoryStore::default()));
    let payload = serde_json::to_value(record()).expect("record serializes");

    let response = app
        .oneshot(post_json("/api/v1/scholarships/score", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["score"], 78);
    assert_eq!(body["tier"], "good");
    assert_eq!(body["components"].as_array().map(Vec::len), Some(6));
}
