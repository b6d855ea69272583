use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::invalid;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::AuthService;
use crate::types::dto::auth::{LoginEnvelope, LoginRequest};
use crate::types::dto::common::MessageResponse;

/// Authentication API endpoints
pub struct AuthApi {
    auth_service: AuthService,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_service: AuthService::new(app_data),
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/api/auth")]
impl AuthApi {
    /// Exchange email and password for a bearer token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<LoginEnvelope>, ApiError> {
        body.validate().map_err(invalid)?;

        let email = body.email.as_deref().unwrap_or_default();
        let password = body.password.as_deref().unwrap_or_default();
        let result = self.auth_service.login(email, password).await?;

        Ok(Json(LoginEnvelope {
            success: true,
            data: result,
        }))
    }

    /// Create the Admin role and the configured admin account when missing
    #[oai(path = "/seed-admin", method = "post", tag = "AuthTags::Authentication")]
    async fn seed_admin(&self) -> Result<Json<MessageResponse>, ApiError> {
        self.auth_service.seed_admin().await?;
        Ok(Json(MessageResponse::new("Admin seeded (if not existing)")))
    }
}
