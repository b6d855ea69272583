use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppSettings;
use crate::errors::InternalError;
use crate::providers::{CryptoProvider, TimezoneProvider, TokenProvider};
use crate::stores::{RoleStore, SiteStore, UserStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across services
/// and API structs.
///
/// ```text
/// main.rs
///   ↓ connect + migrate
/// AppData::init(db, settings)
///   ↓ creates once
///   ├─ role_store / site_store / user_store
///   ├─ crypto_provider (Argon2id)
///   ├─ token_provider (HS256)
///   └─ timezone_provider (reqwest)
///   ↓ wrapped in Arc<AppData>
///   ├─ services::*::new(app_data)
///   └─ api::build_app(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: Arc<AppSettings>,
    pub role_store: Arc<RoleStore>,
    pub site_store: Arc<SiteStore>,
    pub user_store: Arc<UserStore>,
    pub crypto_provider: Arc<CryptoProvider>,
    pub token_provider: Arc<TokenProvider>,
    pub timezone_provider: Arc<TimezoneProvider>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database should be connected and migrated before calling this.
    pub fn init(db: DatabaseConnection, settings: AppSettings) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        let role_store = Arc::new(RoleStore::new(db.clone()));
        let site_store = Arc::new(SiteStore::new(db.clone()));
        let user_store = Arc::new(UserStore::new(db.clone()));

        let crypto_provider = Arc::new(CryptoProvider::new()?);
        let token_provider = Arc::new(TokenProvider::new(
            settings.jwt_secret(),
            settings.jwt_expires_in_secs(),
        ));
        let timezone_provider = Arc::new(TimezoneProvider::new(settings.timezone_api_url())?);

        tracing::info!("AppData initialized");

        Ok(Self {
            db,
            settings: Arc::new(settings),
            role_store,
            site_store,
            user_store,
            crypto_provider,
            token_provider,
            timezone_provider,
        })
    }
}
