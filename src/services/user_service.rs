use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use poem_openapi::types::MaybeUndefined;

use crate::app_data::AppData;
use crate::errors::internal::UserError;
use crate::errors::InternalError;
use crate::providers::CryptoProvider;
use crate::stores::user_store::{NewUser, UserChanges, UserFilter};
use crate::stores::{RoleStore, SiteStore, UserStore};
use crate::types::db::{role, site, user, Status};
use crate::types::dto::common::format_timestamp;
use crate::types::dto::user::{
    CreateUserRequest, RoleRef, SiteRef, UpdateUserRequest, UserListQuery, UserView,
};
use crate::types::internal::pagination::{Page, PageRequest};

/// User account management. Users are never hard-deleted.
pub struct UserService {
    user_store: Arc<UserStore>,
    role_store: Arc<RoleStore>,
    site_store: Arc<SiteStore>,
    crypto_provider: Arc<CryptoProvider>,
}

impl UserService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: Arc::clone(&app_data.user_store),
            role_store: Arc::clone(&app_data.role_store),
            site_store: Arc::clone(&app_data.site_store),
            crypto_provider: Arc::clone(&app_data.crypto_provider),
        }
    }

    pub async fn list(&self, query: &UserListQuery) -> Result<Page<UserView>, InternalError> {
        let filter = UserFilter {
            search: query.search.as_deref().map(str::trim).map(str::to_string),
            status: query.status.as_deref().and_then(Status::parse),
            site_id: query.site.clone(),
            role_id: query.role.clone(),
        };
        let page = self
            .user_store
            .list(&filter, PageRequest::new(query.page, query.limit))
            .await?;

        let items = self.to_user_views(page.items).await?;
        Ok(Page {
            items,
            request: page.request,
            total: page.total,
        })
    }

    pub async fn get(&self, id: &str) -> Result<UserView, InternalError> {
        let user = self.find_existing(id).await?;
        self.to_user_view(user).await
    }

    pub async fn create(&self, request: CreateUserRequest) -> Result<UserView, InternalError> {
        let email = request.email.unwrap_or_default();
        if self.user_store.find_by_email(&email).await?.is_some() {
            return Err(UserError::EmailInUse { email }.into());
        }

        let role = self.require_role(&request.role.unwrap_or_default()).await?;

        let site = match request.site.filter(|s| !s.is_empty()) {
            Some(site_id) => Some(self.require_site(&site_id).await?),
            None => None,
        };

        let password_hash = self
            .crypto_provider
            .hash_password(&request.password.unwrap_or_default())?;

        let user = self
            .user_store
            .create(NewUser {
                name: request.name.unwrap_or_default().trim().to_string(),
                email: email.clone(),
                password_hash,
                status: request
                    .status
                    .as_deref()
                    .and_then(Status::parse)
                    .unwrap_or_default(),
                role_id: role.id.clone(),
                site_id: site.as_ref().map(|s| s.id.clone()),
            })
            .await
            .map_err(|e| email_conflict(e, &email))?;

        tracing::info!("Created user {} with role {}", user.id, role.id);
        Ok(build_view(&user, Some(&role), site.as_ref()))
    }

    /// Partial update, then a fresh read so the view reflects stored state
    pub async fn update(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<UserView, InternalError> {
        let user = self.find_existing(id).await?;
        let mut changes = UserChanges::default();

        if let Some(email) = request.email {
            if email != user.email {
                if self.user_store.find_by_email(&email).await?.is_some() {
                    return Err(UserError::EmailInUse { email }.into());
                }
                changes.email = Some(email);
            }
        }

        if let Some(name) = request.name {
            changes.name = Some(name.trim().to_string());
        }

        if let Some(password) = request.password {
            changes.password_hash = Some(self.crypto_provider.hash_password(&password)?);
        }

        if let Some(role_id) = request.role {
            let role = self.require_role(&role_id).await?;
            changes.role_id = Some(role.id);
        }

        match request.site {
            MaybeUndefined::Undefined => {}
            MaybeUndefined::Null => changes.site_id = Some(None),
            MaybeUndefined::Value(site_id) if site_id.is_empty() => changes.site_id = Some(None),
            MaybeUndefined::Value(site_id) => {
                let site = self.require_site(&site_id).await?;
                changes.site_id = Some(Some(site.id));
            }
        }

        if let Some(status) = request.status.as_deref().and_then(Status::parse) {
            changes.status = Some(status);
        }

        let new_email = changes.email.clone();
        let updated = self
            .user_store
            .update(user, changes)
            .await
            .map_err(|e| match &new_email {
                Some(email) => email_conflict(e, email),
                None => e,
            })?;
        tracing::info!("Updated user {}", updated.id);

        self.get(&updated.id).await
    }

    /// Flip status to inactive. Already-inactive users are left untouched.
    pub async fn deactivate(&self, id: &str) -> Result<(), InternalError> {
        let user = self.find_existing(id).await?;
        if user.status == Status::Inactive {
            tracing::debug!("User {} already inactive", user.id);
            return Ok(());
        }

        let user = self
            .user_store
            .update(
                user,
                UserChanges {
                    status: Some(Status::Inactive),
                    ..Default::default()
                },
            )
            .await?;
        tracing::info!("Deactivated user {}", user.id);
        Ok(())
    }

    async fn find_existing(&self, id: &str) -> Result<user::Model, InternalError> {
        self.user_store.find_by_id(id).await?.ok_or_else(|| {
            UserError::NotFound {
                user_id: id.to_string(),
            }
            .into()
        })
    }

    async fn require_role(&self, role_id: &str) -> Result<role::Model, InternalError> {
        self.role_store.find_by_id(role_id).await?.ok_or_else(|| {
            UserError::InvalidRole {
                role_id: role_id.to_string(),
            }
            .into()
        })
    }

    async fn require_site(&self, site_id: &str) -> Result<site::Model, InternalError> {
        self.site_store.find_by_id(site_id).await?.ok_or_else(|| {
            UserError::InvalidSite {
                site_id: site_id.to_string(),
            }
            .into()
        })
    }

    async fn to_user_view(&self, user: user::Model) -> Result<UserView, InternalError> {
        let mut views = self.to_user_views(vec![user]).await?;
        views
            .pop()
            .ok_or_else(|| InternalError::parse("user view", "population returned no rows"))
    }

    /// Populate role and site summaries with one batch lookup each
    async fn to_user_views(&self, users: Vec<user::Model>) -> Result<Vec<UserView>, InternalError> {
        let role_ids: Vec<String> = users
            .iter()
            .map(|u| u.role_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let site_ids: Vec<String> = users
            .iter()
            .filter_map(|u| u.site_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let (roles, sites) = tokio::try_join!(
            self.role_store.find_by_ids(&role_ids),
            self.site_store.find_by_ids(&site_ids)
        )?;

        let roles: HashMap<String, role::Model> =
            roles.into_iter().map(|r| (r.id.clone(), r)).collect();
        let sites: HashMap<String, site::Model> =
            sites.into_iter().map(|s| (s.id.clone(), s)).collect();

        Ok(users
            .iter()
            .map(|u| {
                let site = u.site_id.as_ref().and_then(|id| sites.get(id));
                build_view(u, roles.get(&u.role_id), site)
            })
            .collect())
    }
}

fn build_view(user: &user::Model, role: Option<&role::Model>, site: Option<&site::Model>) -> UserView {
    UserView {
        id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        status: user.status,
        role: role.map(|r| RoleRef {
            id: r.id.clone(),
            name: r.name.clone(),
        }),
        site: site.map(|s| SiteRef {
            id: s.id.clone(),
            name: s.name.clone(),
            location: s.location.clone(),
        }),
        created_at: format_timestamp(user.created_at),
        updated_at: format_timestamp(user.updated_at),
    }
}

fn email_conflict(err: InternalError, email: &str) -> InternalError {
    if err.is_unique_violation() {
        UserError::EmailInUse {
            email: email.to_string(),
        }
        .into()
    } else {
        err
    }
}
