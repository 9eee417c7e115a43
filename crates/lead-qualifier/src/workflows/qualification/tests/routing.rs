use super::common::*;
use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::qualification::qualification_router;
use crate::workflows::qualification::router::qualify_handler;

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn qualify_route_normalizes_padded_keys() {
    let (service, publisher) = build_service();
    let router = qualification_router(Arc::new(service));

    let payload = json!({
        "name ": "Mike Chen",
        " Email": "mike@startupxyz.com",
        "phone ": "555-987-6543",
        "company": "StartupXYZ",
        "message ": "We're looking to automate our customer support. Can you send me some information about pricing?",
        "source": "LinkedIn"
    });

    let response = router
        .oneshot(
            Request::post("/qualify-lead")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["score"], 7);
    assert_eq!(body["category"], "WARM");
    assert_eq!(
        body["action"],
        "PRIORITY: Follow up within 24 hours - Nurture to reach decision makers"
    );
    assert_eq!(publisher.notices().len(), 1);
}

#[tokio::test]
async fn handler_rejects_non_object_payloads() {
    let (service, publisher) = build_service();

    let response = qualify_handler::<MemoryPublisher>(
        State(Arc::new(service)),
        axum::Json(json!(["not", "a", "lead"])),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("an array"));
    assert!(publisher.notices().is_empty());
}

#[tokio::test]
async fn handler_prefers_model_output_in_payload() {
    let (service, _) = build_service();

    let response = qualify_handler::<MemoryPublisher>(
        State(Arc::new(service)),
        axum::Json(json!({
            "name": "John Smith",
            "email": "john@gmail.com",
            "message": "Just browsing",
            "model_output": "Lead score: 6/10, moderate interest"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["score"], 6);
    assert_eq!(body["category"], "WARM");
}
