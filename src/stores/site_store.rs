use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::stores::{contains_ignore_case, now_millis};
use crate::types::db::site::{self, ActiveModel, Entity as Site};
use crate::types::db::Status;
use crate::types::internal::pagination::{Page, PageRequest};

/// Filters accepted by `SiteStore::list`
#[derive(Debug, Default, Clone)]
pub struct SiteFilter {
    /// Case-insensitive substring over name and location
    pub search: Option<String>,
    pub status: Option<Status>,
}

#[derive(Debug, Clone)]
pub struct NewSite {
    pub name: String,
    pub location: String,
    pub timezone: String,
    pub status: Status,
}

#[derive(Debug, Default, Clone)]
pub struct SiteChanges {
    pub name: Option<String>,
    pub location: Option<String>,
    pub timezone: Option<String>,
    pub status: Option<Status>,
}

/// SiteStore manages physical site rows
pub struct SiteStore {
    db: DatabaseConnection,
}

impl SiteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<site::Model>, InternalError> {
        Site::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_site_by_id", e))
    }

    pub async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<site::Model>, InternalError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Site::find()
            .filter(site::Column::Id.is_in(ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_sites_by_ids", e))
    }

    pub async fn list(
        &self,
        filter: &SiteFilter,
        page: PageRequest,
    ) -> Result<Page<site::Model>, InternalError> {
        let mut condition = Condition::all();
        if let Some(status) = filter.status {
            condition = condition.add(site::Column::Status.eq(status));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            condition = condition.add(
                Condition::any()
                    .add(contains_ignore_case(site::Column::Name, search))
                    .add(contains_ignore_case(site::Column::Location, search)),
            );
        }

        let query = Site::find()
            .filter(condition.clone())
            .order_by_desc(site::Column::CreatedAt)
            .order_by_desc(site::Column::Id);
        let total = Site::find().filter(condition).count(&self.db);

        // Pages past the addressable offset range hold no rows; only count
        let (items, total) = match page.offset() {
            Some(offset) => tokio::try_join!(
                query.offset(offset).limit(page.limit).all(&self.db),
                total
            ),
            None => total.await.map(|total| (Vec::new(), total)),
        }
        .map_err(|e| InternalError::database("list_sites", e))?;

        Ok(Page {
            items,
            request: page,
            total,
        })
    }

    pub async fn create(&self, new_site: NewSite) -> Result<site::Model, InternalError> {
        let now = now_millis();
        let model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(new_site.name),
            location: Set(new_site.location),
            timezone: Set(new_site.timezone),
            status: Set(new_site.status),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_site", e))
    }

    pub async fn update(
        &self,
        existing: site::Model,
        changes: SiteChanges,
    ) -> Result<site::Model, InternalError> {
        let mut model: ActiveModel = existing.into();
        if let Some(name) = changes.name {
            model.name = Set(name);
        }
        if let Some(location) = changes.location {
            model.location = Set(location);
        }
        if let Some(timezone) = changes.timezone {
            model.timezone = Set(timezone);
        }
        if let Some(status) = changes.status {
            model.status = Set(status);
        }
        model.updated_at = Set(now_millis());

        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_site", e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        Site::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_site", e))?;
        Ok(())
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        Site::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_sites", e))
    }
}
