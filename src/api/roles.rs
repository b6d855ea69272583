use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, ApiResponse, OpenApi, Tags};

use crate::api::invalid;
use crate::app_data::AppData;
use crate::auth::permissions::{ROLES_CREATE, ROLES_DELETE, ROLES_READ, ROLES_UPDATE};
use crate::auth::Authenticator;
use crate::errors::ApiError;
use crate::services::RoleService;
use crate::types::dto::common::{MessageResponse, PaginationMeta};
use crate::types::dto::role::{
    CreateRoleRequest, RoleEnvelope, RoleListEnvelope, RoleListQuery, UpdateRoleRequest,
};
use crate::types::internal::validation::validate_id;

/// Role management endpoints
pub struct RolesApi {
    authenticator: Authenticator,
    role_service: RoleService,
}

impl RolesApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authenticator: Authenticator::new(app_data.clone()),
            role_service: RoleService::new(app_data),
        }
    }
}

#[derive(Tags)]
enum RoleTags {
    /// Roles and their permission sets
    Roles,
}

#[derive(ApiResponse)]
enum CreateRoleResponse {
    /// Role created
    #[oai(status = 201)]
    Created(Json<RoleEnvelope>),
}

#[OpenApi(prefix_path = "/api")]
impl RolesApi {
    #[oai(path = "/roles", method = "get", tag = "RoleTags::Roles")]
    async fn list(
        &self,
        req: &Request,
        page: Query<Option<i64>>,
        limit: Query<Option<i64>>,
        search: Query<Option<String>>,
    ) -> Result<Json<RoleListEnvelope>, ApiError> {
        self.authenticator.authorize(req, &[ROLES_READ]).await?;

        let query = RoleListQuery {
            page: page.0,
            limit: limit.0,
            search: search.0,
        };
        query.validate().map_err(invalid)?;

        let page = self.role_service.list(&query).await?;
        let pagination = PaginationMeta::from(&page);
        Ok(Json(RoleListEnvelope {
            success: true,
            data: page.items,
            pagination,
        }))
    }

    #[oai(path = "/roles", method = "post", tag = "RoleTags::Roles")]
    async fn create(
        &self,
        req: &Request,
        body: Json<CreateRoleRequest>,
    ) -> Result<CreateRoleResponse, ApiError> {
        self.authenticator.authorize(req, &[ROLES_CREATE]).await?;
        body.validate().map_err(invalid)?;

        let role = self.role_service.create(body.0).await?;
        Ok(CreateRoleResponse::Created(Json(RoleEnvelope {
            success: true,
            data: role,
        })))
    }

    #[oai(path = "/roles/:id", method = "get", tag = "RoleTags::Roles")]
    async fn get(&self, req: &Request, id: Path<String>) -> Result<Json<RoleEnvelope>, ApiError> {
        self.authenticator.authorize(req, &[ROLES_READ]).await?;
        validate_id(&id).map_err(invalid)?;

        let role = self.role_service.get(&id).await?;
        Ok(Json(RoleEnvelope {
            success: true,
            data: role,
        }))
    }

    /// System roles are rejected
    #[oai(path = "/roles/:id", method = "put", tag = "RoleTags::Roles")]
    async fn update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<UpdateRoleRequest>,
    ) -> Result<Json<RoleEnvelope>, ApiError> {
        self.authenticator.authorize(req, &[ROLES_UPDATE]).await?;
        validate_id(&id).map_err(invalid)?;
        body.validate().map_err(invalid)?;

        let role = self.role_service.update(&id, body.0).await?;
        Ok(Json(RoleEnvelope {
            success: true,
            data: role,
        }))
    }

    /// Refused for system roles and roles still assigned to users
    #[oai(path = "/roles/:id", method = "delete", tag = "RoleTags::Roles")]
    async fn delete(
        &self,
        req: &Request,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        self.authenticator.authorize(req, &[ROLES_DELETE]).await?;
        validate_id(&id).map_err(invalid)?;

        self.role_service.delete(&id).await?;
        Ok(Json(MessageResponse::new("Role deleted")))
    }
}
