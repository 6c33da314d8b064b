//! Integration tests for user registration and lookup.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use hireai_database::store::{ProfileStore, UserStore};

use helpers::{TestApp, identity};

#[tokio::test]
async fn test_register_interviewer_with_company() {
    let app = TestApp::new();
    app.sign_in("tok_ivan", identity("user_ivan", "ivan@example.com", None, None))
        .await;

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({
                "external_id": "user_ivan",
                "email": "ivan@example.com",
                "name": "Ivan Petrov",
                "role": "interviewer",
                "company_name": "Acme"
            })),
            Some("tok_ivan"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["user"]["role"], "interviewer");
    assert_eq!(response.body["profile"]["kind"], "interviewer");
    assert_eq!(response.body["profile"]["company_name"], "Acme");

    let user = app
        .users
        .find_by_external_id("user_ivan")
        .await
        .unwrap()
        .unwrap();
    assert!(app.profiles.find_interviewer(user.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_register_updates_only_provided_fields() {
    let app = TestApp::new();
    app.sign_in("tok_jane", identity("user_jane", "jane@example.com", None, None))
        .await;

    let first = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "external_id": "user_jane", "name": "Jane Doe" })),
            Some("tok_jane"),
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "external_id": "user_jane", "role": "interviewer" })),
            Some("tok_jane"),
            None,
        )
        .await;

    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["user"]["id"], first.body["user"]["id"]);
    assert_eq!(second.body["user"]["username"], first.body["user"]["username"]);
    assert_eq!(second.body["user"]["email"], "jane@example.com");
    assert_eq!(second.body["user"]["role"], "interviewer");
    assert_eq!(app.users.len().await, 1);
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let app = TestApp::new();
    app.sign_in("tok_jane", identity("user_jane", "jane@example.com", None, None))
        .await;

    let bad_role = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "external_id": "user_jane", "role": "admin" })),
            Some("tok_jane"),
            None,
        )
        .await;
    assert_eq!(bad_role.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_role.body["error"], "VALIDATION_ERROR");

    let bad_email = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "external_id": "user_jane", "email": "nope" })),
            Some("tok_jane"),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_requires_matching_identity() {
    let app = TestApp::new();
    app.sign_in("tok_jane", identity("user_jane", "jane@example.com", None, None))
        .await;

    let unauthenticated = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "external_id": "user_jane" })),
            None,
            None,
        )
        .await;
    assert_eq!(unauthenticated.status, StatusCode::UNAUTHORIZED);

    let other = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "external_id": "user_mallory", "role": "interviewer" })),
            Some("tok_jane"),
            None,
        )
        .await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);
    assert!(
        app.users
            .find_by_external_id("user_mallory")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_users_me_returns_user_and_profile() {
    let app = TestApp::new();
    app.sign_in(
        "tok_jane",
        identity("user_jane", "jane@example.com", None, Some("candidate")),
    )
    .await;

    let response = app
        .request("GET", "/api/users/me", None, Some("tok_jane"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["external_id"], "user_jane");
    assert_eq!(response.body["profile"]["kind"], "candidate");
}
