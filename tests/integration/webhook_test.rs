//! Integration tests for identity webhook intake.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use hireai_auth::webhook::compute_signature;
use hireai_database::store::{ProfileStore, UserStore};
use hireai_entity::user::UserRole;

use helpers::{TestApp, WEBHOOK_SECRET, event, identity};

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[tokio::test]
async fn test_created_event_provisions_user_and_profile() {
    let app = TestApp::new();

    let response = app
        .webhook(&event(
            "user.created",
            identity("user_ivan", "ivan@example.com", Some("interviewer"), None),
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["received"], true);
    assert_eq!(response.body["outcome"], "created");

    let user = app
        .users
        .find_by_external_id("user_ivan")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.role, UserRole::Interviewer);
    assert_eq!(user.email.as_deref(), Some("ivan@example.com"));
    assert!(app.profiles.find_interviewer(user.id).await.unwrap().is_some());
    assert!(app.profiles.find_candidate(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_delivery_is_acknowledged_without_changes() {
    let app = TestApp::new();
    let payload = event(
        "user.created",
        identity("user_jane", "jane@example.com", None, None),
    );

    let first = app.webhook(&payload).await;
    let second = app.webhook(&payload).await;

    assert_eq!(first.body["outcome"], "created");
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["outcome"], "unchanged");
    assert_eq!(app.users.len().await, 1);
    assert_eq!(app.profiles.count().await, 1);
}

#[tokio::test]
async fn test_rejects_bad_signature_without_state_change() {
    let app = TestApp::new();
    let body = serde_json::to_vec(&event(
        "user.created",
        identity("user_x", "x@example.com", None, None),
    ))
    .unwrap();
    let ts = now().to_string();
    let signature = compute_signature("whsec_d3Jvbmctc2VjcmV0", &ts, &body).unwrap();

    let response = app
        .webhook_raw(body, Some(format!("t={ts},v1={signature}")), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid signature");
    assert!(app.users.is_empty().await);
}

#[tokio::test]
async fn test_rejects_missing_signature_and_stale_timestamp() {
    let app = TestApp::new();
    let body = serde_json::to_vec(&event(
        "user.created",
        identity("user_x", "x@example.com", None, None),
    ))
    .unwrap();

    let missing = app.webhook_raw(body.clone(), None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let stale = (now() - 301).to_string();
    let signature = compute_signature(WEBHOOK_SECRET, &stale, &body).unwrap();
    let replayed = app
        .webhook_raw(body, Some(format!("t={stale},v1={signature}")), None)
        .await;
    assert_eq!(replayed.status, StatusCode::UNAUTHORIZED);
    assert!(app.users.is_empty().await);
}

#[tokio::test]
async fn test_reserialized_body_fails_verification() {
    let app = TestApp::new();
    let original = br#"{"type":"user.created","data":{"id":"user_y","email_addresses":[]}}"#;
    let ts = now().to_string();
    let signature = compute_signature(WEBHOOK_SECRET, &ts, original).unwrap();

    let reformatted = serde_json::to_vec_pretty(
        &serde_json::from_slice::<serde_json::Value>(original).unwrap(),
    )
    .unwrap();

    let response = app
        .webhook_raw(reformatted, Some(format!("t={ts},v1={signature}")), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .webhook_raw(original.to_vec(), Some(format!("t={ts},v1={signature}")), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_timestamp_from_separate_header_and_rotated_signatures() {
    let app = TestApp::new();
    let body = serde_json::to_vec(&event(
        "user.created",
        identity("user_z", "z@example.com", None, None),
    ))
    .unwrap();
    let ts = now().to_string();
    let good = compute_signature(WEBHOOK_SECRET, &ts, &body).unwrap();
    let old = compute_signature("whsec_b2xkLXNlY3JldA==", &ts, &body).unwrap();

    let response = app
        .webhook_raw(body, Some(format!("v1={old},v1={good}")), Some(ts))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["outcome"], "created");
}

#[tokio::test]
async fn test_malformed_payload_is_bad_request() {
    let app = TestApp::new();
    let body = b"{not json".to_vec();
    let ts = now().to_string();
    let signature = compute_signature(WEBHOOK_SECRET, &ts, &body).unwrap();

    let response = app
        .webhook_raw(body, Some(format!("t={ts},v1={signature}")), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "WEBHOOK_PROCESSING_FAILED");
}

#[tokio::test]
async fn test_unknown_event_type_is_acknowledged() {
    let app = TestApp::new();

    let response = app
        .webhook(&event("session.created", json!({ "id": "sess_1" })))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["outcome"], "skipped");
    assert!(app.users.is_empty().await);
}

#[tokio::test]
async fn test_updated_event_changes_only_present_fields() {
    let app = TestApp::new();
    app.webhook(&event(
        "user.created",
        identity("user_jane", "jane@example.com", None, None),
    ))
    .await;

    let response = app
        .webhook(&event(
            "user.updated",
            json!({ "id": "user_jane", "public_metadata": { "role": "interviewer", "company_name": "Acme" } }),
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["outcome"], "updated");

    let user = app
        .users
        .find_by_external_id("user_jane")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.role, UserRole::Interviewer);
    assert_eq!(user.email.as_deref(), Some("jane@example.com"));
    assert_eq!(user.username, "jane");

    let profile = app.profiles.find_interviewer(user.id).await.unwrap().unwrap();
    assert_eq!(profile.company_name.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn test_deleted_event_removes_user_and_profiles() {
    let app = TestApp::new();
    app.webhook(&event(
        "user.created",
        identity("user_jane", "jane@example.com", None, None),
    ))
    .await;

    let deleted = app
        .webhook(&event("user.deleted", json!({ "id": "user_jane", "deleted": true })))
        .await;
    assert_eq!(deleted.body["outcome"], "deleted");
    assert!(app.users.is_empty().await);
    assert_eq!(app.profiles.count().await, 0);

    let again = app
        .webhook(&event("user.deleted", json!({ "id": "user_jane", "deleted": true })))
        .await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.body["outcome"], "skipped");
}

#[tokio::test]
async fn test_unconfigured_secret_rejects_everything() {
    let mut config = TestApp::test_config();
    config.webhook.secret = None;
    let app = TestApp::with_config(config);

    let response = app
        .webhook(&event(
            "user.created",
            identity("user_jane", "jane@example.com", None, None),
        ))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(app.users.is_empty().await);
}
