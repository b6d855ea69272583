use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, ApiResponse, OpenApi, Tags};

use crate::api::invalid;
use crate::app_data::AppData;
use crate::auth::permissions::{USERS_CREATE, USERS_DEACTIVATE, USERS_READ, USERS_UPDATE};
use crate::auth::Authenticator;
use crate::errors::ApiError;
use crate::services::UserService;
use crate::types::dto::common::{MessageResponse, PaginationMeta};
use crate::types::dto::user::{
    CreateUserRequest, UpdateUserRequest, UserEnvelope, UserListEnvelope, UserListQuery,
};
use crate::types::internal::validation::validate_id;

/// User management endpoints
pub struct UsersApi {
    authenticator: Authenticator,
    user_service: UserService,
}

impl UsersApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authenticator: Authenticator::new(app_data.clone()),
            user_service: UserService::new(app_data),
        }
    }
}

#[derive(Tags)]
enum UserTags {
    /// User accounts
    Users,
}

#[derive(ApiResponse)]
enum CreateUserResponse {
    /// User created
    #[oai(status = 201)]
    Created(Json<UserEnvelope>),
}

#[OpenApi(prefix_path = "/api")]
impl UsersApi {
    /// List users, newest first
    #[oai(path = "/users", method = "get", tag = "UserTags::Users")]
    async fn list(
        &self,
        req: &Request,
        page: Query<Option<i64>>,
        limit: Query<Option<i64>>,
        search: Query<Option<String>>,
        status: Query<Option<String>>,
        site: Query<Option<String>>,
        role: Query<Option<String>>,
    ) -> Result<Json<UserListEnvelope>, ApiError> {
        self.authenticator.authorize(req, &[USERS_READ]).await?;

        let query = UserListQuery {
            page: page.0,
            limit: limit.0,
            search: search.0,
            status: status.0,
            site: site.0,
            role: role.0,
        };
        query.validate().map_err(invalid)?;

        let page = self.user_service.list(&query).await?;
        let pagination = PaginationMeta::from(&page);
        Ok(Json(UserListEnvelope {
            success: true,
            data: page.items,
            pagination,
        }))
    }

    /// Create a user
    #[oai(path = "/users", method = "post", tag = "UserTags::Users")]
    async fn create(
        &self,
        req: &Request,
        body: Json<CreateUserRequest>,
    ) -> Result<CreateUserResponse, ApiError> {
        self.authenticator.authorize(req, &[USERS_CREATE]).await?;
        body.validate().map_err(invalid)?;

        let user = self.user_service.create(body.0).await?;
        Ok(CreateUserResponse::Created(Json(UserEnvelope {
            success: true,
            data: user,
        })))
    }

    /// Fetch one user with role and site summaries
    #[oai(path = "/users/:id", method = "get", tag = "UserTags::Users")]
    async fn get(&self, req: &Request, id: Path<String>) -> Result<Json<UserEnvelope>, ApiError> {
        self.authenticator.authorize(req, &[USERS_READ]).await?;
        validate_id(&id).map_err(invalid)?;

        let user = self.user_service.get(&id).await?;
        Ok(Json(UserEnvelope {
            success: true,
            data: user,
        }))
    }

    /// Partially update a user
    #[oai(path = "/users/:id", method = "put", tag = "UserTags::Users")]
    async fn update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<UpdateUserRequest>,
    ) -> Result<Json<UserEnvelope>, ApiError> {
        self.authenticator.authorize(req, &[USERS_UPDATE]).await?;
        validate_id(&id).map_err(invalid)?;
        body.validate().map_err(invalid)?;

        let user = self.user_service.update(&id, body.0).await?;
        Ok(Json(UserEnvelope {
            success: true,
            data: user,
        }))
    }

    /// Mark a user inactive
    #[oai(path = "/users/:id/deactivate", method = "patch", tag = "UserTags::Users")]
    async fn deactivate(
        &self,
        req: &Request,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        self.authenticator.authorize(req, &[USERS_DEACTIVATE]).await?;
        validate_id(&id).map_err(invalid)?;

        self.user_service.deactivate(&id).await?;
        Ok(Json(MessageResponse::new("User deactivated")))
    }
}
