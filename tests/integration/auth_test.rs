//! Integration tests for the session flow: login, me, logout.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TestApp, identity};

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::new();
    app.sign_in("tok_jane", identity("user_jane", "jane@example.com", None, None))
        .await;

    let response = app
        .request("POST", "/api/auth/login", None, Some("tok_jane"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Login successful");
    assert_eq!(response.body["user"]["external_id"], "user_jane");
    assert_eq!(response.body["user"]["username"], "jane");
    assert_eq!(response.body["user"]["email"], "jane@example.com");
    assert_eq!(response.body["user"]["role"], "candidate");
    assert!(response.body.get("cached").is_none());

    let cookie = response.set_cookie("token").expect("session cookie");
    let lower = cookie.to_ascii_lowercase();
    assert!(lower.contains("httponly"));
    assert!(lower.contains("samesite=lax"));
    assert!(lower.contains("path=/"));
    assert!(lower.contains("max-age=604800"));
}

#[tokio::test]
async fn test_login_without_bearer_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/auth/login", None, None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");

    let response = app
        .request("POST", "/api/auth/login", None, Some("forged"), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.set_cookie("token").is_none());
    assert!(app.users.is_empty().await);
}

#[tokio::test]
async fn test_bearer_scheme_is_case_insensitive() {
    let app = TestApp::new();
    app.sign_in("tok_jane", identity("user_jane", "jane@example.com", None, None))
        .await;

    let lower = app
        .request_with_authorization("GET", "/api/users/me", "bearer tok_jane")
        .await;
    assert_eq!(lower.status, StatusCode::OK);
    assert_eq!(lower.body["user"]["external_id"], "user_jane");

    let basic = app
        .request_with_authorization("GET", "/api/users/me", "Basic dXNlcjpwYXNz")
        .await;
    assert_eq!(basic.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_repeat_login_within_cooldown_is_cached() {
    let app = TestApp::new();
    app.sign_in("tok_jane", identity("user_jane", "jane@example.com", None, None))
        .await;

    let first = app
        .request("POST", "/api/auth/login", None, Some("tok_jane"), None)
        .await;
    let second = app
        .request("POST", "/api/auth/login", None, Some("tok_jane"), None)
        .await;

    assert!(first.set_cookie("token").is_some());
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["cached"], true);
    assert_eq!(second.body["message"], "Login successful (cached)");
    assert_eq!(second.body["user"]["id"], first.body["user"]["id"]);
    assert!(second.set_cookie("token").is_none());
}

#[tokio::test]
async fn test_cooldown_is_per_user() {
    let app = TestApp::new();
    app.sign_in("tok_a", identity("user_a", "a@example.com", None, None))
        .await;
    app.sign_in("tok_b", identity("user_b", "b@example.com", None, None))
        .await;

    let a = app
        .request("POST", "/api/auth/login", None, Some("tok_a"), None)
        .await;
    let b = app
        .request("POST", "/api/auth/login", None, Some("tok_b"), None)
        .await;

    assert!(a.set_cookie("token").is_some());
    assert!(b.set_cookie("token").is_some());
    assert!(b.body.get("cached").is_none());
}

#[tokio::test]
async fn test_me_with_session_cookie() {
    let app = TestApp::new();
    app.sign_in(
        "tok_ivan",
        identity("user_ivan", "ivan@example.com", Some("interviewer"), None),
    )
    .await;
    let cookie = app.login("tok_ivan").await;

    let response = app
        .request("GET", "/api/auth/me", None, None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["external_id"], "user_ivan");
    assert_eq!(response.body["user"]["role"], "interviewer");
}

#[tokio::test]
async fn test_me_rejects_missing_or_forged_cookie() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/auth/me", None, None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let forged = app
        .request("GET", "/api/auth/me", None, None, Some("token=not.a.jwt"))
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_rejects_cookie_signed_with_another_secret() {
    let app = TestApp::new();
    app.sign_in("tok_jane", identity("user_jane", "jane@example.com", None, None))
        .await;

    let mut other_config = TestApp::test_config();
    other_config.auth.session_secret = "a-different-secret".to_string();
    let other = TestApp::with_config(other_config);
    other
        .sign_in("tok_jane", identity("user_jane", "jane@example.com", None, None))
        .await;
    let foreign_cookie = other.login("tok_jane").await;

    let response = app
        .request("GET", "/api/auth/me", None, None, Some(&foreign_cookie))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_rejects_session_of_deleted_user() {
    let app = TestApp::new();
    app.sign_in("tok_jane", identity("user_jane", "jane@example.com", None, None))
        .await;
    let cookie = app.login("tok_jane").await;

    let deleted = app
        .webhook(&helpers::event("user.deleted", json!({ "id": "user_jane" })))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/auth/me", None, None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie_with_matching_attributes() {
    let app = TestApp::new();
    app.sign_in("tok_jane", identity("user_jane", "jane@example.com", None, None))
        .await;

    let login = app
        .request("POST", "/api/auth/login", None, Some("tok_jane"), None)
        .await;
    let logout = app
        .request("POST", "/api/auth/logout", None, None, None)
        .await;

    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.body["message"], "Logout successful");
    assert!(logout.body["logout_time"].is_string());

    let removal = logout.set_cookie("token").expect("removal cookie");
    assert!(removal.to_ascii_lowercase().contains("max-age=0"));
    assert_eq!(
        login.cookie_attributes("token"),
        logout.cookie_attributes("token")
    );
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "connected");
}
