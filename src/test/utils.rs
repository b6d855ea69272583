// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::{AppSettings, MockEnvironment};
use crate::stores::role_store::NewRole;
use crate::stores::user_store::NewUser;
use crate::types::db::{role, user, Status};

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";

/// In-memory SQLite database with all migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Settings for tests; the timezone upstream points at a closed port
pub fn test_settings() -> AppSettings {
    let env = MockEnvironment::empty().with_vars(&[
        ("APP_ENV", "test"),
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("JWT_EXPIRES_IN", "1h"),
        ("TIMEZONE_API_URL", "http://127.0.0.1:9/timezones"),
        ("SEED_ADMIN_EMAIL", "admin@tenantapp.local"),
        ("SEED_ADMIN_PASSWORD", "Admin@123"),
    ]);
    AppSettings::from_env_provider(&env).expect("Failed to build test settings")
}

/// Full AppData over a fresh in-memory database
pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    Arc::new(AppData::init(db, test_settings()).expect("Failed to init AppData"))
}

pub async fn create_test_role(app_data: &AppData, name: &str, permissions: &[&str]) -> role::Model {
    app_data
        .role_store
        .create(NewRole {
            name: name.to_string(),
            description: String::new(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            is_system: false,
        })
        .await
        .expect("Failed to create test role")
}

pub async fn create_test_user(
    app_data: &AppData,
    email: &str,
    password: &str,
    role_id: &str,
) -> user::Model {
    let password_hash = app_data
        .crypto_provider
        .hash_password(password)
        .expect("Failed to hash password");
    app_data
        .user_store
        .create(NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash,
            status: Status::Active,
            role_id: role_id.to_string(),
            site_id: None,
        })
        .await
        .expect("Failed to create test user")
}
