use std::sync::Arc;

use crate::app_data::AppData;
use crate::auth::permissions::ADMIN_PERMISSIONS;
use crate::config::AppSettings;
use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::providers::{CryptoProvider, TokenProvider};
use crate::stores::role_store::{decode_permissions, NewRole};
use crate::stores::user_store::NewUser;
use crate::stores::{RoleStore, UserStore};
use crate::types::db::Status;
use crate::types::dto::auth::{LoginResult, LoginUser};

pub const ADMIN_ROLE_NAME: &str = "Admin";
const ADMIN_ROLE_DESCRIPTION: &str = "System administrator";
const ADMIN_USER_NAME: &str = "Super Admin";

/// What `seed_admin` actually created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOutcome {
    pub role_created: bool,
    pub user_created: bool,
}

/// Authentication service: credential checks, token issuance and admin seeding
pub struct AuthService {
    user_store: Arc<UserStore>,
    role_store: Arc<RoleStore>,
    crypto_provider: Arc<CryptoProvider>,
    token_provider: Arc<TokenProvider>,
    settings: Arc<AppSettings>,
}

impl AuthService {
    /// Create AuthService from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: Arc::clone(&app_data.user_store),
            role_store: Arc::clone(&app_data.role_store),
            crypto_provider: Arc::clone(&app_data.crypto_provider),
            token_provider: Arc::clone(&app_data.token_provider),
            settings: Arc::clone(&app_data.settings),
        }
    }

    /// Verify an email/password pair and issue a token
    ///
    /// Unknown email and wrong password fail identically. The inactive check
    /// runs only after the password matched.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, InternalError> {
        let user = match self.user_store.find_by_email(email).await? {
            Some(user) => user,
            None => {
                self.crypto_provider.verify_dummy(password);
                tracing::debug!("Login failed: unknown email");
                return Err(CredentialError::InvalidCredentials.into());
            }
        };

        if !self
            .crypto_provider
            .verify_password(password, &user.password_hash)?
        {
            tracing::debug!("Login failed: wrong password for user {}", user.id);
            return Err(CredentialError::InvalidCredentials.into());
        }

        if user.status != Status::Active {
            tracing::info!("Login refused for inactive user {}", user.id);
            return Err(CredentialError::InactiveUser.into());
        }

        let role = self.role_store.find_by_id(&user.role_id).await?;
        let permissions = match &role {
            Some(role) => decode_permissions(role)?,
            None => Vec::new(),
        };

        let token = self
            .token_provider
            .issue(&user.id, &user.role_id, permissions.clone())?;

        tracing::info!("User {} logged in", user.id);

        Ok(LoginResult {
            token,
            user: LoginUser {
                id: user.id,
                name: user.name,
                email: user.email,
                role_id: user.role_id,
                role_name: role.map(|r| r.name),
                permissions,
            },
        })
    }

    /// Ensure the Admin system role and the configured admin account exist
    ///
    /// Safe to call any number of times.
    pub async fn seed_admin(&self) -> Result<SeedOutcome, InternalError> {
        let mut outcome = SeedOutcome {
            role_created: false,
            user_created: false,
        };

        let admin_role = match self.role_store.find_by_name(ADMIN_ROLE_NAME).await? {
            Some(role) => role,
            None => {
                let role = self
                    .role_store
                    .create(NewRole {
                        name: ADMIN_ROLE_NAME.to_string(),
                        description: ADMIN_ROLE_DESCRIPTION.to_string(),
                        permissions: ADMIN_PERMISSIONS.iter().map(|p| p.to_string()).collect(),
                        is_system: true,
                    })
                    .await?;
                tracing::info!("Seeded {} role {}", ADMIN_ROLE_NAME, role.id);
                outcome.role_created = true;
                role
            }
        };

        let email = self.settings.seed_admin_email();
        if self.user_store.find_by_email(email).await?.is_none() {
            let password_hash = self
                .crypto_provider
                .hash_password(self.settings.seed_admin_password())?;
            let user = self
                .user_store
                .create(NewUser {
                    name: ADMIN_USER_NAME.to_string(),
                    email: email.to_string(),
                    password_hash,
                    status: Status::Active,
                    role_id: admin_role.id,
                    site_id: None,
                })
                .await?;
            tracing::info!("Seeded admin user {} <{}>", user.id, email);
            outcome.user_created = true;
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::user_store::UserChanges;
    use crate::test::utils::{create_test_role, create_test_user, setup_test_app_data};

    #[tokio::test]
    async fn test_login_success_token_matches_user() {
        let app_data = setup_test_app_data().await;
        let role = create_test_role(&app_data, "Reader", &["users:read"]).await;
        let user = create_test_user(&app_data, "ann@example.com", "secret1", &role.id).await;
        let service = AuthService::new(app_data.clone());

        let result = service.login("ann@example.com", "secret1").await.unwrap();

        assert_eq!(result.user.id, user.id);
        assert_eq!(result.user.role_id, role.id);
        assert_eq!(result.user.role_name.as_deref(), Some("Reader"));
        assert_eq!(result.user.permissions, vec!["users:read".to_string()]);

        let claims = app_data.token_provider.verify(&result.token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role_id, role.id);
        assert_eq!(claims.permissions, vec!["users:read".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
        let app_data = setup_test_app_data().await;
        let role = create_test_role(&app_data, "Reader", &[]).await;
        create_test_user(&app_data, "ann@example.com", "secret1", &role.id).await;
        let service = AuthService::new(app_data);

        let wrong_password = service.login("ann@example.com", "wrong-pass").await.unwrap_err();
        let unknown_email = service.login("nobody@example.com", "secret1").await.unwrap_err();

        assert_eq!(wrong_password.to_string(), "Invalid credentials");
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(
            unknown_email,
            InternalError::Credential(CredentialError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_email_match_is_case_sensitive() {
        let app_data = setup_test_app_data().await;
        let role = create_test_role(&app_data, "Reader", &[]).await;
        create_test_user(&app_data, "ann@example.com", "secret1", &role.id).await;
        let service = AuthService::new(app_data);

        assert!(matches!(
            service.login("Ann@example.com", "secret1").await,
            Err(InternalError::Credential(CredentialError::InvalidCredentials))
        ));
    }

    #[tokio::test]
    async fn test_inactive_user_is_refused() {
        let app_data = setup_test_app_data().await;
        let role = create_test_role(&app_data, "Reader", &[]).await;
        let user = create_test_user(&app_data, "ann@example.com", "secret1", &role.id).await;
        app_data
            .user_store
            .update(
                user,
                UserChanges {
                    status: Some(Status::Inactive),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let service = AuthService::new(app_data);

        match service.login("ann@example.com", "secret1").await {
            Err(InternalError::Credential(CredentialError::InactiveUser)) => {}
            other => panic!("Expected InactiveUser, got {:?}", other.map(|r| r.user)),
        }
        // Wrong password on an inactive account still reads as bad credentials
        assert!(matches!(
            service.login("ann@example.com", "nope-nope").await,
            Err(InternalError::Credential(CredentialError::InvalidCredentials))
        ));
    }

    #[tokio::test]
    async fn test_seed_admin_is_idempotent() {
        let app_data = setup_test_app_data().await;
        let service = AuthService::new(app_data.clone());

        let first = service.seed_admin().await.unwrap();
        assert!(first.role_created);
        assert!(first.user_created);

        let second = service.seed_admin().await.unwrap();
        assert!(!second.role_created);
        assert!(!second.user_created);

        assert_eq!(app_data.role_store.count().await.unwrap(), 1);
        assert_eq!(app_data.user_store.count(None).await.unwrap(), 1);

        let role = app_data
            .role_store
            .find_by_name(ADMIN_ROLE_NAME)
            .await
            .unwrap()
            .unwrap();
        assert!(role.is_system);
        assert_eq!(role.description, "System administrator");
        assert_eq!(decode_permissions(&role).unwrap().len(), 13);
    }

    #[tokio::test]
    async fn test_seeded_admin_can_log_in() {
        let app_data = setup_test_app_data().await;
        let service = AuthService::new(app_data);
        service.seed_admin().await.unwrap();

        let result = service
            .login("admin@tenantapp.local", "Admin@123")
            .await
            .unwrap();
        assert_eq!(result.user.name, "Super Admin");
        assert_eq!(result.user.role_name.as_deref(), Some(ADMIN_ROLE_NAME));
        assert!(result.user.permissions.contains(&"dashboard:read".to_string()));
    }
}
