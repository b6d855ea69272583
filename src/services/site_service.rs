use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::internal::SiteError;
use crate::errors::InternalError;
use crate::stores::site_store::{NewSite, SiteChanges, SiteFilter};
use crate::stores::{SiteStore, UserStore};
use crate::types::db::{site, Status};
use crate::types::dto::common::format_timestamp;
use crate::types::dto::site::{CreateSiteRequest, SiteListQuery, SiteView, UpdateSiteRequest};
use crate::types::internal::pagination::{Page, PageRequest};

/// Plain site CRUD; deletion is blocked while users reference the site
pub struct SiteService {
    site_store: Arc<SiteStore>,
    user_store: Arc<UserStore>,
}

impl SiteService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            site_store: Arc::clone(&app_data.site_store),
            user_store: Arc::clone(&app_data.user_store),
        }
    }

    pub async fn list(&self, query: &SiteListQuery) -> Result<Page<SiteView>, InternalError> {
        let filter = SiteFilter {
            search: query.search.as_deref().map(str::trim).map(str::to_string),
            status: query.status.as_deref().and_then(Status::parse),
        };
        let page = self
            .site_store
            .list(&filter, PageRequest::new(query.page, query.limit))
            .await?;
        Ok(page.map(|s| to_site_view(&s)))
    }

    pub async fn get(&self, id: &str) -> Result<SiteView, InternalError> {
        let site = self.find_existing(id).await?;
        Ok(to_site_view(&site))
    }

    pub async fn create(&self, request: CreateSiteRequest) -> Result<SiteView, InternalError> {
        let new_site = NewSite {
            name: request.name.unwrap_or_default().trim().to_string(),
            location: trimmed_or_empty(request.location),
            timezone: trimmed_or_empty(request.timezone),
            status: request
                .status
                .as_deref()
                .and_then(Status::parse)
                .unwrap_or_default(),
        };

        let site = self.site_store.create(new_site).await?;
        tracing::info!("Created site {} ({})", site.id, site.name);
        Ok(to_site_view(&site))
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateSiteRequest,
    ) -> Result<SiteView, InternalError> {
        let site = self.find_existing(id).await?;

        let changes = SiteChanges {
            name: request.name.map(|n| n.trim().to_string()),
            location: request.location.map(|l| l.trim().to_string()),
            timezone: request.timezone.map(|t| t.trim().to_string()),
            status: request.status.as_deref().and_then(Status::parse),
        };

        let site = self.site_store.update(site, changes).await?;
        tracing::info!("Updated site {}", site.id);
        Ok(to_site_view(&site))
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        let site = self.find_existing(id).await?;

        let user_count = self.user_store.count_by_site(&site.id).await?;
        if user_count > 0 {
            return Err(SiteError::InUse { user_count }.into());
        }

        self.site_store.delete(&site.id).await?;
        tracing::info!("Deleted site {}", site.id);
        Ok(())
    }

    async fn find_existing(&self, id: &str) -> Result<site::Model, InternalError> {
        self.site_store.find_by_id(id).await?.ok_or_else(|| {
            SiteError::NotFound {
                site_id: id.to_string(),
            }
            .into()
        })
    }
}

pub(crate) fn to_site_view(site: &site::Model) -> SiteView {
    SiteView {
        id: site.id.clone(),
        name: site.name.clone(),
        location: site.location.clone(),
        timezone: site.timezone.clone(),
        status: site.status,
        created_at: format_timestamp(site.created_at),
        updated_at: format_timestamp(site.updated_at),
    }
}

fn trimmed_or_empty(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
