use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, ApiResponse, OpenApi, Tags};

use crate::api::invalid;
use crate::app_data::AppData;
use crate::auth::permissions::{SITES_CREATE, SITES_DELETE, SITES_READ, SITES_UPDATE};
use crate::auth::Authenticator;
use crate::errors::ApiError;
use crate::services::SiteService;
use crate::types::dto::common::{MessageResponse, PaginationMeta};
use crate::types::dto::site::{
    CreateSiteRequest, SiteEnvelope, SiteListEnvelope, SiteListQuery, UpdateSiteRequest,
};
use crate::types::internal::validation::validate_id;

/// Site management endpoints
pub struct SitesApi {
    authenticator: Authenticator,
    site_service: SiteService,
}

impl SitesApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authenticator: Authenticator::new(app_data.clone()),
            site_service: SiteService::new(app_data),
        }
    }
}

#[derive(Tags)]
enum SiteTags {
    /// Physical sites users can be assigned to
    Sites,
}

#[derive(ApiResponse)]
enum CreateSiteResponse {
    /// Site created
    #[oai(status = 201)]
    Created(Json<SiteEnvelope>),
}

#[OpenApi(prefix_path = "/api")]
impl SitesApi {
    #[oai(path = "/sites", method = "get", tag = "SiteTags::Sites")]
    async fn list(
        &self,
        req: &Request,
        page: Query<Option<i64>>,
        limit: Query<Option<i64>>,
        search: Query<Option<String>>,
        status: Query<Option<String>>,
    ) -> Result<Json<SiteListEnvelope>, ApiError> {
        self.authenticator.authorize(req, &[SITES_READ]).await?;

        let query = SiteListQuery {
            page: page.0,
            limit: limit.0,
            search: search.0,
            status: status.0,
        };
        query.validate().map_err(invalid)?;

        let page = self.site_service.list(&query).await?;
        let pagination = PaginationMeta::from(&page);
        Ok(Json(SiteListEnvelope {
            success: true,
            data: page.items,
            pagination,
        }))
    }

    #[oai(path = "/sites", method = "post", tag = "SiteTags::Sites")]
    async fn create(
        &self,
        req: &Request,
        body: Json<CreateSiteRequest>,
    ) -> Result<CreateSiteResponse, ApiError> {
        self.authenticator.authorize(req, &[SITES_CREATE]).await?;
        body.validate().map_err(invalid)?;

        let site = self.site_service.create(body.0).await?;
        Ok(CreateSiteResponse::Created(Json(SiteEnvelope {
            success: true,
            data: site,
        })))
    }

    #[oai(path = "/sites/:id", method = "get", tag = "SiteTags::Sites")]
    async fn get(&self, req: &Request, id: Path<String>) -> Result<Json<SiteEnvelope>, ApiError> {
        self.authenticator.authorize(req, &[SITES_READ]).await?;
        validate_id(&id).map_err(invalid)?;

        let site = self.site_service.get(&id).await?;
        Ok(Json(SiteEnvelope {
            success: true,
            data: site,
        }))
    }

    #[oai(path = "/sites/:id", method = "put", tag = "SiteTags::Sites")]
    async fn update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<UpdateSiteRequest>,
    ) -> Result<Json<SiteEnvelope>, ApiError> {
        self.authenticator.authorize(req, &[SITES_UPDATE]).await?;
        validate_id(&id).map_err(invalid)?;
        body.validate().map_err(invalid)?;

        let site = self.site_service.update(&id, body.0).await?;
        Ok(Json(SiteEnvelope {
            success: true,
            data: site,
        }))
    }

    /// Refused while any user is assigned to the site
    #[oai(path = "/sites/:id", method = "delete", tag = "SiteTags::Sites")]
    async fn delete(
        &self,
        req: &Request,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        self.authenticator.authorize(req, &[SITES_DELETE]).await?;
        validate_id(&id).map_err(invalid)?;

        self.site_service.delete(&id).await?;
        Ok(Json(MessageResponse::new("Site deleted")))
    }
}
