mod common;

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use poem::http::StatusCode;
use serde_json::json;

use common::{admin_token, bearer, json_body, login, spawn_app, spawn_app_in, user_with_permissions};
use tenant_console::types::internal::auth::Claims;

#[tokio::test]
async fn test_health_needs_no_auth() {
    let app = spawn_app().await;

    let resp = app.client.get("/health").send().await;
    resp.assert_status_is_ok();
    let body = json_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_unknown_route_is_enveloped_not_found() {
    let app = spawn_app().await;

    let resp = app.client.get("/api/nothing-here").send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(resp).await,
        json!({ "success": false, "message": "Not found" })
    );
}

#[tokio::test]
async fn test_login_envelope() {
    let app = spawn_app().await;
    admin_token(&app).await;

    let resp = app
        .client
        .post("/api/auth/login")
        .body_json(&json!({ "email": common::ADMIN_EMAIL, "password": common::ADMIN_PASSWORD }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = json_body(resp).await;

    assert_eq!(body["success"], true);
    assert!(body["data"]["token"].as_str().is_some());
    let user = &body["data"]["user"];
    assert_eq!(user["email"], common::ADMIN_EMAIL);
    assert_eq!(user["roleName"], "Admin");
    assert_eq!(user["permissions"].as_array().map(Vec::len), Some(13));
    assert!(user.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let app = spawn_app().await;
    admin_token(&app).await;

    let wrong_password = app
        .client
        .post("/api/auth/login")
        .body_json(&json!({ "email": common::ADMIN_EMAIL, "password": "not-the-password" }))
        .send()
        .await;
    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    let wrong_password = json_body(wrong_password).await;

    let unknown_email = app
        .client
        .post("/api/auth/login")
        .body_json(&json!({ "email": "ghost@example.com", "password": "whatever1" }))
        .send()
        .await;
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);
    let unknown_email = json_body(unknown_email).await;

    assert_eq!(wrong_password["message"], "Invalid credentials");
    assert_eq!(wrong_password["message"], unknown_email["message"]);
}

#[tokio::test]
async fn test_login_validation_aggregates_fields() {
    let app = spawn_app().await;

    let resp = app
        .client
        .post("/api/auth/login")
        .body_json(&json!({ "email": "nope" }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "\"email\" must be a valid email, \"password\" is required"
    );
}

#[tokio::test]
async fn test_missing_and_malformed_tokens() {
    let app = spawn_app().await;

    let resp = app.client.get("/api/dashboard").send().await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await["message"], "Authentication token missing");

    let resp = app
        .client
        .get("/api/dashboard")
        .header("Authorization", "Token abc")
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await["message"], "Authentication token missing");

    let resp = app
        .client
        .get("/api/dashboard")
        .header("Authorization", "Bearer not.a.jwt")
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await["message"], "Invalid token");
}

#[tokio::test]
async fn test_expired_token() {
    let app = spawn_app().await;
    admin_token(&app).await;
    let admin = app
        .app_data
        .user_store
        .find_by_email(common::ADMIN_EMAIL)
        .await
        .unwrap()
        .unwrap();

    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: admin.id,
        role_id: admin.role_id,
        permissions: vec![],
        iat: now - 7200,
        exp: now - 3600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret("integration-secret-minimum-32-characters".as_bytes()),
    )
    .unwrap();

    let resp = app
        .client
        .get("/api/dashboard")
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await["message"], "Token expired");
}

#[tokio::test]
async fn test_missing_permission_is_forbidden() {
    let app = spawn_app().await;
    let token = user_with_permissions(&app, "viewer@example.com", &["sites:read"]).await;

    let resp = app
        .client
        .get("/api/dashboard")
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(json_body(resp).await["message"], "Insufficient permissions");

    // Timezones require both permissions
    let resp = app
        .client
        .get("/api/timezones")
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deactivated_user_token_stops_working() {
    let app = spawn_app().await;
    let admin = admin_token(&app).await;
    let token = user_with_permissions(&app, "temp@example.com", &["dashboard:read"]).await;

    app.client
        .get("/api/dashboard")
        .header("Authorization", bearer(&token))
        .send()
        .await
        .assert_status_is_ok();

    let user = app
        .app_data
        .user_store
        .find_by_email("temp@example.com")
        .await
        .unwrap()
        .unwrap();
    app.client
        .patch(format!("/api/users/{}/deactivate", user.id))
        .header("Authorization", bearer(&admin))
        .send()
        .await
        .assert_status_is_ok();

    let resp = app
        .client
        .get("/api/dashboard")
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await["message"], "User not found or inactive");

    // Correct password, inactive account
    let resp = app
        .client
        .post("/api/auth/login")
        .body_json(&json!({ "email": "temp@example.com", "password": "secret1" }))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(json_body(resp).await["message"], "User is inactive");
}

#[tokio::test]
async fn test_seed_admin_endpoint_is_idempotent() {
    let app = spawn_app().await;

    for _ in 0..2 {
        let resp = app.client.post("/api/auth/seed-admin").send().await;
        resp.assert_status_is_ok();
        assert_eq!(
            json_body(resp).await,
            json!({ "success": true, "message": "Admin seeded (if not existing)" })
        );
    }
    assert_eq!(app.app_data.user_store.count(None).await.unwrap(), 1);
    login(&app, common::ADMIN_EMAIL, common::ADMIN_PASSWORD).await;
}

#[tokio::test]
async fn test_production_errors_carry_no_stack() {
    let app = spawn_app_in("production").await;

    let resp = app.client.get("/api/users").send().await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body = json_body(resp).await;
    assert_eq!(body["message"], "Authentication token missing");
    assert!(body.get("stack").is_none());
}
