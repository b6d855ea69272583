use std::sync::Arc;

use poem::http::header;
use poem::Request;

use crate::app_data::AppData;
use crate::auth::permissions::require_permissions;
use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::providers::TokenProvider;
use crate::stores::role_store::decode_permissions;
use crate::stores::{RoleStore, UserStore};
use crate::types::db::Status;
use crate::types::internal::context::AuthContext;

/// Turns a bearer token into an `AuthContext`
///
/// The token only proves identity. Status, role and permissions are read
/// fresh from storage on every call, so a deactivated user or an edited role
/// takes effect immediately.
pub struct Authenticator {
    token_provider: Arc<TokenProvider>,
    user_store: Arc<UserStore>,
    role_store: Arc<RoleStore>,
}

impl Authenticator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.token_provider),
            user_store: Arc::clone(&app_data.user_store),
            role_store: Arc::clone(&app_data.role_store),
        }
    }

    pub async fn authenticate(&self, req: &Request) -> Result<AuthContext, InternalError> {
        self.authenticate_header(req.header(header::AUTHORIZATION))
            .await
    }

    /// Authenticate from a raw `Authorization` header value
    pub async fn authenticate_header(
        &self,
        authorization: Option<&str>,
    ) -> Result<AuthContext, InternalError> {
        let token = authorization
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(CredentialError::MissingToken)?;

        let claims = self.token_provider.verify(token)?;

        let user = self
            .user_store
            .find_by_id(&claims.sub)
            .await?
            .filter(|user| user.status == Status::Active)
            .ok_or_else(|| {
                tracing::debug!("Token subject {} is missing or inactive", claims.sub);
                CredentialError::UserUnavailable
            })?;

        let role = self.role_store.find_by_id(&user.role_id).await?;
        let permissions = match &role {
            Some(role) => decode_permissions(role)?,
            None => Vec::new(),
        };

        Ok(AuthContext {
            user_id: user.id,
            name: user.name,
            email: user.email,
            role_id: user.role_id,
            role_name: role.map(|r| r.name),
            permissions,
            site_id: user.site_id,
        })
    }

    /// Authenticate, then require every permission in `required`
    pub async fn authorize(
        &self,
        req: &Request,
        required: &[&str],
    ) -> Result<AuthContext, InternalError> {
        let context = self.authenticate(req).await?;
        require_permissions(Some(&context), required)?;
        Ok(context)
    }
}
