mod common;

use std::time::Duration;

use account_service::domain::auth::models::AuthOperation;
use account_service::domain::auth::models::OutcomeStatus;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

async fn message(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    body["data"]["message"]
        .as_str()
        .expect("Error body has a message")
        .to_string()
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.seed_user(7, "alice", "correct-pw");

    let response = app
        .post("/auth/login")
        .json(&json!({
            "username": "alice",
            "password": "correct-pw"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 200);
    assert_eq!(body["data"]["user"]["id"], 7);
    assert_eq!(body["data"]["user"]["username"], "alice");
    assert!(body["data"]["user"].get("password_hash").is_none());

    let token = body["data"]["token"].as_str().expect("Token is a string");
    assert_eq!(token.split('.').count(), 3);

    let claims = app.jwt_handler.parse(token).expect("Issued token must verify");
    assert_eq!(claims.sub, "7");
    assert_eq!(claims.username, "alice");

    assert_eq!(
        app.outcomes.recorded(),
        vec![(AuthOperation::Login, OutcomeStatus::Success)]
    );
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.seed_user(7, "alice", "correct-pw");

    let wrong_password = app
        .post("/auth/login")
        .json(&json!({ "username": "alice", "password": "wrong-pw" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_user = app
        .post("/auth/login")
        .json(&json!({ "username": "mallory", "password": "correct-pw" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(wrong_password).await, "invalid credentials");
    assert_eq!(message(unknown_user).await, "invalid credentials");

    assert_eq!(
        app.outcomes.recorded(),
        vec![
            (AuthOperation::Login, OutcomeStatus::Failed),
            (AuthOperation::Login, OutcomeStatus::Failed),
        ]
    );
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/login")
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_username_is_case_insensitive() {
    let app = TestApp::spawn().await;
    app.seed_user(7, "alice", "correct-pw");

    let response = app
        .post("/auth/login")
        .json(&json!({ "username": " Alice ", "password": "correct-pw" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_timeout() {
    let app =
        TestApp::spawn_with_timeouts(Duration::from_millis(50), Duration::from_secs(5)).await;
    app.seed_user(7, "alice", "correct-pw");
    app.users.set_lookup_delay(Duration::from_secs(5));

    let response = app
        .post("/auth/login")
        .json(&json!({ "username": "alice", "password": "correct-pw" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        app.outcomes.recorded(),
        vec![(AuthOperation::Login, OutcomeStatus::TimedOut)]
    );
}

#[tokio::test]
async fn test_get_user_owner() {
    let app = TestApp::spawn().await;
    app.seed_user(7, "alice", "correct-pw");
    let token = app.token_for(7, "alice");

    let response = app
        .get_authenticated("/user/7", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], 7);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_get_user_other_subject_forbidden() {
    let app = TestApp::spawn().await;
    app.seed_user(5, "bob", "bob-password");
    app.seed_user(7, "alice", "correct-pw");
    let token = app.token_for(5, "bob");

    let response = app
        .get_authenticated("/user/7", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.users.find_by_id_calls(), 0);
}

#[tokio::test]
async fn test_missing_authorization_header() {
    let app = TestApp::spawn().await;
    app.seed_user(7, "alice", "correct-pw");

    let response = app
        .get("/user/7")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(response).await, "no token provided");
    assert_eq!(app.users.find_by_id_calls(), 0);
}

#[tokio::test]
async fn test_rejected_tokens() {
    let app = TestApp::spawn().await;
    app.seed_user(7, "alice", "correct-pw");

    let tokens = [
        app.expired_token_for(7, "alice"),
        app.rogue_token_for(7, "alice"),
        app.hs256_token_for(7, "alice"),
        "not.a.token".to_string(),
    ];

    for token in tokens {
        let response = app
            .get_authenticated("/user/7", &token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message(response).await, "invalid or expired token");
    }

    assert_eq!(app.users.find_by_id_calls(), 0);
}

#[tokio::test]
async fn test_non_bearer_scheme_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/user/7")
        .basic_auth("alice", Some("correct-pw"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_lowercase_bearer_scheme_accepted() {
    let app = TestApp::spawn().await;
    app.seed_user(7, "alice", "correct-pw");
    let token = app.token_for(7, "alice");

    let response = app
        .get("/user/7")
        .header("Authorization", format!("bearer {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_non_numeric_path_id() {
    let app = TestApp::spawn().await;
    let token = app.token_for(7, "alice");

    let response = app
        .get_authenticated("/user/seven", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_validate_token_endpoint() {
    let app = TestApp::spawn().await;
    let token = app.token_for(7, "alice");

    let response = app
        .post_authenticated("/auth/validate", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["valid"], true);
    assert_eq!(body["data"]["user_id"], "7");
    assert_eq!(body["data"]["username"], "alice");

    let expired = app
        .post_authenticated("/auth/validate", &app.expired_token_for(7, "alice"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(expired.status(), StatusCode::UNAUTHORIZED);

    let missing = app
        .post("/auth/validate")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(
        app.outcomes.recorded(),
        vec![
            (AuthOperation::ValidateToken, OutcomeStatus::Success),
            (AuthOperation::ValidateToken, OutcomeStatus::Failed),
        ]
    );
}

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/user")
        .json(&json!({
            "name": "Carol",
            "username": "carol",
            "email": "carol@example.com",
            "password": "long-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let id = body["data"]["id"].as_i64().expect("Numeric id");
    assert_eq!(body["data"]["username"], "carol");

    let login = app
        .post("/auth/login")
        .json(&json!({ "username": "carol", "password": "long-password" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(login.status(), StatusCode::OK);

    let body: serde_json::Value = login.json().await.expect("Failed to parse response");
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let own = app
        .get_authenticated(&format!("/user/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(own.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_validation_and_conflicts() {
    let app = TestApp::spawn().await;
    app.seed_user(7, "alice", "correct-pw");

    let short_password = app
        .post("/user")
        .json(&json!({
            "username": "carol",
            "email": "carol@example.com",
            "password": "short"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(short_password.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bad_email = app
        .post("/user")
        .json(&json!({
            "username": "carol",
            "email": "not-an-email",
            "password": "long-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(bad_email.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let duplicate = app
        .post("/user")
        .json(&json!({
            "username": "ALICE",
            "email": "other@example.com",
            "password": "long-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    assert!(message(duplicate).await.contains("already exists"));
}

#[tokio::test]
async fn test_update_user() {
    let app = TestApp::spawn().await;
    app.seed_user(5, "bob", "bob-password");
    app.seed_user(7, "alice", "correct-pw");

    let response = app
        .patch_authenticated("/user/7", &app.token_for(7, "alice"))
        .json(&json!({ "name": "Alice Liddell", "password": "new-password" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Alice Liddell");

    let relogin = app
        .post("/auth/login")
        .json(&json!({ "username": "alice", "password": "new-password" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(relogin.status(), StatusCode::OK);

    let forbidden = app
        .patch_authenticated("/user/7", &app.token_for(5, "bob"))
        .json(&json!({ "name": "Mallory" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_catalog_subscription_is_public() {
    let app = TestApp::spawn().await;
    app.seed_catalog(3, "Pro", 9.99);

    let response = app
        .get("/subscription/3")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Pro");
    assert_eq!(body["data"]["price"], 9.99);

    let missing = app
        .get("/subscription/99")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_subscription_lifecycle() {
    let app = TestApp::spawn().await;
    app.seed_user(7, "alice", "correct-pw");
    app.seed_catalog(3, "Pro", 9.99);
    let token = app.token_for(7, "alice");

    let created = app
        .post_authenticated("/user/7/subscription/3", &token)
        .json(&json!({ "type": "enterprise", "company_name": "Acme", "role": "admin" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(created.status(), StatusCode::CREATED);

    let body: serde_json::Value = created.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["type"], "enterprise");
    assert_eq!(body["data"]["is_active"], true);
    let user_subscription_id = body["data"]["id"].as_i64().unwrap();

    let duplicate = app
        .post_authenticated("/user/7/subscription/3", &token)
        .json(&json!({ "type": "individual" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let listed = app
        .get_authenticated("/user/7/subscription", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(listed.status(), StatusCode::OK);
    let body: serde_json::Value = listed.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let updated = app
        .patch_authenticated(
            &format!("/user/7/subscription/{}", user_subscription_id),
            &token,
        )
        .json(&json!({ "role": "billing", "is_active": false }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(updated.status(), StatusCode::OK);

    let stored = app.subscriptions.assignment(user_subscription_id).unwrap();
    assert_eq!(stored.role, "billing");
    assert!(!stored.is_active);
    assert_eq!(stored.company_name.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn test_subscription_validation() {
    let app = TestApp::spawn().await;
    app.seed_user(7, "alice", "correct-pw");
    app.seed_catalog(3, "Pro", 9.99);
    let token = app.token_for(7, "alice");

    let bad_kind = app
        .post_authenticated("/user/7/subscription/3", &token)
        .json(&json!({ "type": "family" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(bad_kind.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let backwards = app
        .post_authenticated("/user/7/subscription/3", &token)
        .json(&json!({
            "type": "individual",
            "start_date": "2100-02-01T00:00:00Z",
            "end_date": "2100-01-01T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(backwards.status(), StatusCode::BAD_REQUEST);

    let unknown_plan = app
        .post_authenticated("/user/7/subscription/99", &token)
        .json(&json!({ "type": "individual" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(unknown_plan.status(), StatusCode::NOT_FOUND);

    let unknown_assignment = app
        .patch_authenticated("/user/7/subscription/404", &token)
        .json(&json!({ "role": "admin" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(unknown_assignment.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_subscription_ownership() {
    let app = TestApp::spawn().await;
    app.seed_user(5, "bob", "bob-password");
    app.seed_user(7, "alice", "correct-pw");
    app.seed_catalog(3, "Pro", 9.99);
    let alice = app.token_for(7, "alice");
    let bob = app.token_for(5, "bob");

    let created = app
        .post_authenticated("/user/7/subscription/3", &alice)
        .json(&json!({ "type": "individual" }))
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = created.json().await.expect("Failed to parse response");
    let user_subscription_id = body["data"]["id"].as_i64().unwrap();

    let assign_for_other = app
        .post_authenticated("/user/7/subscription/3", &bob)
        .json(&json!({ "type": "individual" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(assign_for_other.status(), StatusCode::FORBIDDEN);

    let list_other = app
        .get_authenticated("/user/7/subscription", &bob)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(list_other.status(), StatusCode::FORBIDDEN);

    // Bob addresses his own path but names Alice's assignment.
    let update_other = app
        .patch_authenticated(
            &format!("/user/5/subscription/{}", user_subscription_id),
            &bob,
        )
        .json(&json!({ "role": "admin" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(update_other.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "status": "healthy", "db": "connected" }));

    app.users.set_healthy(false);

    let response = app
        .get("/ready")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "unhealthy");
}
