mod common;

use poem::http::StatusCode;
use serde_json::{json, Value};

use common::{admin_token, bearer, json_body, spawn_app, TestApp};

async fn create(app: &TestApp, token: &str, path: &str, body: Value) -> Value {
    let resp = app
        .client
        .post(path)
        .header("Authorization", bearer(token))
        .body_json(&body)
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    let body = json_body(resp).await;
    assert_eq!(body["success"], true);
    body["data"].clone()
}

#[tokio::test]
async fn test_user_lifecycle() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let role = create(&app, &token, "/api/roles", json!({ "name": "Operators", "permissions": ["sites:read"] })).await;
    let site = create(&app, &token, "/api/sites", json!({ "name": "North Yard", "location": "Dock 4" })).await;

    let user = create(
        &app,
        &token,
        "/api/users",
        json!({
            "name": "Olive Operator",
            "email": "olive@example.com",
            "password": "secret1",
            "role": role["id"],
            "site": site["id"],
        }),
    )
    .await;

    assert_eq!(user["status"], "active");
    assert_eq!(user["role"], json!({ "id": role["id"], "name": "Operators" }));
    assert_eq!(
        user["site"],
        json!({ "id": site["id"], "name": "North Yard", "location": "Dock 4" })
    );
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());

    let id = user["id"].as_str().unwrap().to_string();

    // Clear the site with null
    let resp = app
        .client
        .put(format!("/api/users/{}", id))
        .header("Authorization", bearer(&token))
        .body_json(&json!({ "site": null }))
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(json_body(resp).await["data"]["site"], Value::Null);

    for _ in 0..2 {
        let resp = app
            .client
            .patch(format!("/api/users/{}/deactivate", id))
            .header("Authorization", bearer(&token))
            .send()
            .await;
        resp.assert_status_is_ok();
        assert_eq!(
            json_body(resp).await,
            json!({ "success": true, "message": "User deactivated" })
        );
    }

    let resp = app
        .client
        .get(format!("/api/users/{}", id))
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(json_body(resp).await["data"]["status"], "inactive");
}

#[tokio::test]
async fn test_duplicate_email_and_bad_references() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;
    let role = create(&app, &token, "/api/roles", json!({ "name": "Staff" })).await;

    let resp = app
        .client
        .post("/api/users")
        .header("Authorization", bearer(&token))
        .body_json(&json!({
            "name": "Second Admin",
            "email": common::ADMIN_EMAIL,
            "password": "secret1",
            "role": role["id"],
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["message"], "Email already in use");

    let resp = app
        .client
        .post("/api/users")
        .header("Authorization", bearer(&token))
        .body_json(&json!({
            "name": "Nobody",
            "email": "nobody@example.com",
            "password": "secret1",
            "role": uuid::Uuid::new_v4().to_string(),
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["message"], "Invalid role");
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let resp = app
        .client
        .get(format!("/api/users/{}", uuid::Uuid::new_v4()))
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["message"], "User not found");

    let resp = app
        .client
        .get("/api/sites/not-an-id")
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["message"], "\"id\" contains an invalid value");
}

#[tokio::test]
async fn test_role_rules() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let resp = app
        .client
        .post("/api/roles")
        .header("Authorization", bearer(&token))
        .body_json(&json!({ "name": "Admin" }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["message"], "Role name already exists");

    let admin_role = app
        .app_data
        .role_store
        .find_by_name("Admin")
        .await
        .unwrap()
        .unwrap();
    let resp = app
        .client
        .delete(format!("/api/roles/{}", admin_role.id))
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["message"], "System roles cannot be deleted");

    let role = create(&app, &token, "/api/roles", json!({ "name": "Temporary" })).await;
    let resp = app
        .client
        .put(format!("/api/roles/{}", role["id"].as_str().unwrap()))
        .header("Authorization", bearer(&token))
        .body_json(&json!({}))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["message"], "\"value\" must have at least 1 key");

    let resp = app
        .client
        .delete(format!("/api/roles/{}", role["id"].as_str().unwrap()))
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(
        json_body(resp).await,
        json!({ "success": true, "message": "Role deleted" })
    );
}

#[tokio::test]
async fn test_site_in_use_cannot_be_deleted() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;
    let role = create(&app, &token, "/api/roles", json!({ "name": "Staff" })).await;
    let site = create(&app, &token, "/api/sites", json!({ "name": "Depot" })).await;
    let site_id = site["id"].as_str().unwrap().to_string();

    let user = create(
        &app,
        &token,
        "/api/users",
        json!({
            "name": "Sam Staff",
            "email": "sam@example.com",
            "password": "secret1",
            "role": role["id"],
            "site": site_id,
        }),
    )
    .await;

    let resp = app
        .client
        .delete(format!("/api/sites/{}", site_id))
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(resp).await["message"],
        "Cannot delete site: it is assigned to one or more users"
    );

    app.client
        .put(format!("/api/users/{}", user["id"].as_str().unwrap()))
        .header("Authorization", bearer(&token))
        .body_json(&json!({ "site": "" }))
        .send()
        .await
        .assert_status_is_ok();

    let resp = app
        .client
        .delete(format!("/api/sites/{}", site_id))
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(json_body(resp).await["message"], "Site deleted");
}

#[tokio::test]
async fn test_site_pagination() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    for i in 0..25 {
        create(&app, &token, "/api/sites", json!({ "name": format!("Site {:02}", i) })).await;
    }

    let resp = app
        .client
        .get("/api/sites")
        .query("page", &1)
        .query("limit", &10)
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = json_body(resp).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(10));
    assert_eq!(
        body["pagination"],
        json!({ "page": 1, "limit": 10, "total": 25, "totalPages": 3 })
    );

    let resp = app
        .client
        .get("/api/sites")
        .query("page", &3)
        .query("limit", &10)
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = json_body(resp).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(5));
    assert_eq!(
        body["pagination"],
        json!({ "page": 3, "limit": 10, "total": 25, "totalPages": 3 })
    );

    let resp = app
        .client
        .get("/api/sites")
        .query("page", &4)
        .header("Authorization", bearer(&token))
        .send()
        .await;
    let body = json_body(resp).await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["total"], 25);

    let resp = app
        .client
        .get("/api/sites")
        .query("limit", &500)
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(resp).await["message"],
        "\"limit\" must be less than or equal to 100"
    );
}

#[tokio::test]
async fn test_page_beyond_offset_range_is_empty() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    for name in ["Alpha", "Bravo", "Charlie"] {
        create(&app, &token, "/api/sites", json!({ "name": name })).await;
    }

    for path in ["/api/sites", "/api/roles", "/api/users"] {
        let resp = app
            .client
            .get(path)
            .query("page", &i64::MAX)
            .query("limit", &100)
            .header("Authorization", bearer(&token))
            .send()
            .await;
        resp.assert_status_is_ok();
        let body = json_body(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["pagination"]["page"], i64::MAX);
        assert_eq!(body["pagination"]["totalPages"], 1);
    }
}

#[tokio::test]
async fn test_dashboard_counts() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;
    create(&app, &token, "/api/sites", json!({ "name": "Depot" })).await;

    let resp = app
        .client
        .get("/api/dashboard")
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(
        json_body(resp).await,
        json!({
            "success": true,
            "data": { "totalUsers": 1, "activeUsers": 1, "totalRoles": 1, "totalSites": 1 }
        })
    );
}

#[tokio::test]
async fn test_timezone_upstream_failure_is_bad_gateway() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let resp = app
        .client
        .get("/api/timezones")
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_GATEWAY);
    let body = json_body(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to fetch timezones from TimeAPI");
}
