// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::endpoint::BoxEndpoint;
use poem::test::{TestClient, TestResponse};
use sea_orm::{Database, DatabaseConnection};
use serde_json::{json, Value};

use tenant_console::api::build_app;
use tenant_console::config::{AppSettings, MockEnvironment};
use tenant_console::stores::role_store::NewRole;
use tenant_console::stores::user_store::NewUser;
use tenant_console::types::db::Status;
use tenant_console::AppData;

pub const ADMIN_EMAIL: &str = "admin@tenantapp.local";
pub const ADMIN_PASSWORD: &str = "Admin@123";

/// Full route tree over a fresh in-memory database
pub struct TestApp {
    pub client: TestClient<BoxEndpoint<'static>>,
    pub app_data: Arc<AppData>,
}

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn test_settings(app_env: &str) -> AppSettings {
    let env = MockEnvironment::empty().with_vars(&[
        ("APP_ENV", app_env),
        ("JWT_SECRET", "integration-secret-minimum-32-characters"),
        ("JWT_EXPIRES_IN", "1h"),
        ("TIMEZONE_API_URL", "http://127.0.0.1:9/timezones"),
        ("SEED_ADMIN_EMAIL", ADMIN_EMAIL),
        ("SEED_ADMIN_PASSWORD", ADMIN_PASSWORD),
    ]);
    AppSettings::from_env_provider(&env).expect("Failed to build settings")
}

pub async fn spawn_app() -> TestApp {
    spawn_app_in("test").await
}

pub async fn spawn_app_in(app_env: &str) -> TestApp {
    let db = setup_test_db().await;
    let app_data = Arc::new(AppData::init(db, test_settings(app_env)).expect("Failed to init AppData"));
    TestApp {
        client: TestClient::new(build_app(app_data.clone())),
        app_data,
    }
}

/// Read a response body as JSON
pub async fn json_body(resp: TestResponse) -> Value {
    resp.0
        .into_body()
        .into_json::<Value>()
        .await
        .expect("Response body is not JSON")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub async fn login(app: &TestApp, email: &str, password: &str) -> String {
    let resp = app
        .client
        .post("/api/auth/login")
        .body_json(&json!({ "email": email, "password": password }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = json_body(resp).await;
    body["data"]["token"]
        .as_str()
        .expect("Login response carries no token")
        .to_string()
}

/// Seed the admin account and return its token
pub async fn admin_token(app: &TestApp) -> String {
    app.client
        .post("/api/auth/seed-admin")
        .send()
        .await
        .assert_status_is_ok();
    login(app, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

/// Create a role with the given permissions plus an active user holding it
pub async fn user_with_permissions(app: &TestApp, email: &str, permissions: &[&str]) -> String {
    let role = app
        .app_data
        .role_store
        .create(NewRole {
            name: format!("Role for {}", email),
            description: String::new(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            is_system: false,
        })
        .await
        .expect("Failed to create role");

    let password_hash = app
        .app_data
        .crypto_provider
        .hash_password("secret1")
        .expect("Failed to hash password");
    app.app_data
        .user_store
        .create(NewUser {
            name: "Scoped User".to_string(),
            email: email.to_string(),
            password_hash,
            status: Status::Active,
            role_id: role.id,
            site_id: None,
        })
        .await
        .expect("Failed to create user");

    login(app, email, "secret1").await
}
