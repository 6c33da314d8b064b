//! The webhook path and the lazy session-guard path must converge on the same
//! stored state whichever runs first, and however often.

mod helpers;

use axum::http::StatusCode;

use hireai_database::store::{ProfileStore, UserStore};
use hireai_entity::user::{LocalUser, UserRole};

use helpers::{TestApp, event, identity};

async fn stored(app: &TestApp, external_id: &str) -> LocalUser {
    app.users
        .find_by_external_id(external_id)
        .await
        .unwrap()
        .expect("user should exist")
}

#[tokio::test]
async fn test_guard_before_webhook() {
    let app = TestApp::new();
    let data = identity("user_ivan", "ivan@example.com", Some("interviewer"), None);
    app.sign_in("tok_ivan", data.clone()).await;

    let login = app
        .request("POST", "/api/auth/login", None, Some("tok_ivan"), None)
        .await;
    assert_eq!(login.status, StatusCode::OK);

    let webhook = app.webhook(&event("user.created", data)).await;
    assert_eq!(webhook.status, StatusCode::OK);
    assert_eq!(webhook.body["outcome"], "unchanged");

    assert_eq!(app.users.len().await, 1);
    let user = stored(&app, "user_ivan").await;
    assert_eq!(user.id.to_string(), login.body["user"]["id"].as_str().unwrap());
    assert_eq!(user.role, UserRole::Interviewer);
    assert_eq!(app.profiles.count().await, 1);
}

#[tokio::test]
async fn test_both_paths_produce_identical_users() {
    let data = identity("user_jane", "jane@example.com", None, Some("interviewer"));

    let via_webhook = TestApp::new();
    via_webhook
        .webhook(&event("user.created", data.clone()))
        .await;

    let via_guard = TestApp::new();
    via_guard.sign_in("tok_jane", data).await;
    via_guard
        .request("GET", "/api/users/me", None, Some("tok_jane"), None)
        .await;

    let a = stored(&via_webhook, "user_jane").await;
    let b = stored(&via_guard, "user_jane").await;
    assert_eq!(
        (&a.username, &a.email, a.role),
        (&b.username, &b.email, b.role)
    );
    assert_eq!(a.role, UserRole::Interviewer);
    assert!(via_webhook.profiles.find_interviewer(a.id).await.unwrap().is_some());
    assert!(via_guard.profiles.find_interviewer(b.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_out_of_order_update_then_create() {
    let app = TestApp::new();
    let data = identity("user_jane", "jane@example.com", Some("interviewer"), None);

    let updated = app.webhook(&event("user.updated", data.clone())).await;
    let created = app.webhook(&event("user.created", data)).await;

    assert_eq!(updated.body["outcome"], "created");
    assert_eq!(created.body["outcome"], "unchanged");
    assert_eq!(stored(&app, "user_jane").await.role, UserRole::Interviewer);
    assert_eq!(app.users.len().await, 1);
}

#[tokio::test]
async fn test_replayed_event_sequence_converges() {
    let app = TestApp::new();
    let created = event(
        "user.created",
        identity("user_jane", "jane@example.com", None, None),
    );
    let updated = event(
        "user.updated",
        identity("user_jane", "jane.doe@example.com", Some("interviewer"), None),
    );

    for payload in [&created, &updated, &created, &updated, &updated] {
        assert_eq!(app.webhook(payload).await.status, StatusCode::OK);
    }

    let user = stored(&app, "user_jane").await;
    assert_eq!(user.email.as_deref(), Some("jane.doe@example.com"));
    assert_eq!(user.role, UserRole::Interviewer);
    assert_eq!(app.users.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_guard_and_webhook_create_one_user() {
    let app = std::sync::Arc::new(TestApp::new());
    let data = identity("user_race", "race@example.com", None, None);
    app.sign_in("tok_race", data.clone()).await;

    let mut tasks = Vec::new();
    for i in 0..12 {
        let app = std::sync::Arc::clone(&app);
        let data = data.clone();
        tasks.push(tokio::spawn(async move {
            if i % 2 == 0 {
                app.webhook(&event("user.created", data)).await.status
            } else {
                app.request("GET", "/api/users/me", None, Some("tok_race"), None)
                    .await
                    .status
            }
        }));
    }

    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    assert_eq!(app.users.len().await, 1);
    let user = stored(&app, "user_race").await;
    assert!(app.profiles.find_candidate(user.id).await.unwrap().is_some());
    assert_eq!(app.profiles.count().await, 1);
}
