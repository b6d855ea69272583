use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::internal::RoleError;
use crate::errors::InternalError;
use crate::stores::role_store::{decode_permissions, NewRole, RoleChanges, RoleFilter};
use crate::stores::{RoleStore, UserStore};
use crate::types::db::role;
use crate::types::dto::common::format_timestamp;
use crate::types::dto::role::{CreateRoleRequest, RoleListQuery, RoleView, UpdateRoleRequest};
use crate::types::internal::pagination::{Page, PageRequest};

/// Role CRUD with system-role protection and in-use checks
pub struct RoleService {
    role_store: Arc<RoleStore>,
    user_store: Arc<UserStore>,
}

impl RoleService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            role_store: Arc::clone(&app_data.role_store),
            user_store: Arc::clone(&app_data.user_store),
        }
    }

    pub async fn list(&self, query: &RoleListQuery) -> Result<Page<RoleView>, InternalError> {
        let filter = RoleFilter {
            search: query.search.as_deref().map(str::trim).map(str::to_string),
        };
        let page = self
            .role_store
            .list(&filter, PageRequest::new(query.page, query.limit))
            .await?;

        let items = page
            .items
            .iter()
            .map(to_role_view)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            items,
            request: page.request,
            total: page.total,
        })
    }

    pub async fn get(&self, id: &str) -> Result<RoleView, InternalError> {
        let role = self.find_existing(id).await?;
        to_role_view(&role)
    }

    /// Create a non-system role. Name and permission entries are trimmed.
    pub async fn create(&self, request: CreateRoleRequest) -> Result<RoleView, InternalError> {
        let name = request.name.unwrap_or_default().trim().to_string();

        if self.role_store.find_by_name(&name).await?.is_some() {
            return Err(RoleError::NameTaken { name }.into());
        }

        let new_role = NewRole {
            name: name.clone(),
            description: request
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            permissions: trim_permissions(request.permissions.unwrap_or_default()),
            is_system: false,
        };

        let role = self
            .role_store
            .create(new_role)
            .await
            .map_err(|e| name_conflict(e, &name))?;

        tracing::info!("Created role {} ({})", role.id, role.name);
        to_role_view(&role)
    }

    /// Partial update. Name uniqueness is re-checked only when it changes.
    pub async fn update(
        &self,
        id: &str,
        request: UpdateRoleRequest,
    ) -> Result<RoleView, InternalError> {
        let role = self.find_existing(id).await?;
        if role.is_system {
            return Err(RoleError::SystemRoleImmutable.into());
        }

        let mut changes = RoleChanges::default();

        if let Some(name) = request.name.as_deref().map(str::trim) {
            if name != role.name {
                if self.role_store.find_by_name(name).await?.is_some() {
                    return Err(RoleError::NameTaken {
                        name: name.to_string(),
                    }
                    .into());
                }
                changes.name = Some(name.to_string());
            }
        }
        if let Some(description) = request.description {
            changes.description = Some(description.trim().to_string());
        }
        if let Some(permissions) = request.permissions {
            changes.permissions = Some(trim_permissions(permissions));
        }

        let new_name = changes.name.clone();
        let role = self.role_store.update(role, changes).await.map_err(|e| match &new_name {
            Some(name) => name_conflict(e, name),
            None => e,
        })?;

        tracing::info!("Updated role {}", role.id);
        to_role_view(&role)
    }

    /// Delete a role that is neither a system role nor assigned to any user
    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        let role = self.find_existing(id).await?;
        if role.is_system {
            return Err(RoleError::SystemRoleUndeletable.into());
        }

        let user_count = self.user_store.count_by_role(&role.id).await?;
        if user_count > 0 {
            return Err(RoleError::InUse { user_count }.into());
        }

        self.role_store.delete(&role.id).await?;
        tracing::info!("Deleted role {}", role.id);
        Ok(())
    }

    async fn find_existing(&self, id: &str) -> Result<role::Model, InternalError> {
        self.role_store.find_by_id(id).await?.ok_or_else(|| {
            RoleError::NotFound {
                role_id: id.to_string(),
            }
            .into()
        })
    }
}

pub(crate) fn to_role_view(role: &role::Model) -> Result<RoleView, InternalError> {
    Ok(RoleView {
        id: role.id.clone(),
        name: role.name.clone(),
        description: role.description.clone(),
        permissions: decode_permissions(role)?,
        is_system: role.is_system,
        created_at: format_timestamp(role.created_at),
        updated_at: format_timestamp(role.updated_at),
    })
}

fn trim_permissions(permissions: Vec<String>) -> Vec<String> {
    permissions
        .into_iter()
        .map(|p| p.trim().to_string())
        .collect()
}

/// Map a unique-index rejection that slipped past the pre-check
fn name_conflict(err: InternalError, name: &str) -> InternalError {
    if err.is_unique_violation() {
        RoleError::NameTaken {
            name: name.to_string(),
        }
        .into()
    } else {
        err
    }
}
