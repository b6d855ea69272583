use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::stores::{contains_ignore_case, now_millis};
use crate::types::db::user::{self, ActiveModel, Entity as User};
use crate::types::db::Status;
use crate::types::internal::pagination::{Page, PageRequest};

/// Filters accepted by `UserStore::list`. All supplied filters must match.
#[derive(Debug, Default, Clone)]
pub struct UserFilter {
    /// Case-insensitive substring over name and email
    pub search: Option<String>,
    pub status: Option<Status>,
    pub site_id: Option<String>,
    pub role_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub status: Status,
    pub role_id: String,
    pub site_id: Option<String>,
}

/// Changes to apply to a user. `site_id: Some(None)` clears the site.
#[derive(Debug, Default, Clone)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub status: Option<Status>,
    pub role_id: Option<String>,
    pub site_id: Option<Option<String>>,
}

/// UserStore manages user accounts and their role/site references
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    /// Exact, case-sensitive email lookup
    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))
    }

    pub async fn list(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Page<user::Model>, InternalError> {
        let mut condition = Condition::all();
        if let Some(status) = filter.status {
            condition = condition.add(user::Column::Status.eq(status));
        }
        if let Some(site_id) = filter.site_id.as_deref() {
            condition = condition.add(user::Column::SiteId.eq(site_id));
        }
        if let Some(role_id) = filter.role_id.as_deref() {
            condition = condition.add(user::Column::RoleId.eq(role_id));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            condition = condition.add(
                Condition::any()
                    .add(contains_ignore_case(user::Column::Name, search))
                    .add(contains_ignore_case(user::Column::Email, search)),
            );
        }

        let query = User::find()
            .filter(condition.clone())
            .order_by_desc(user::Column::CreatedAt)
            .order_by_desc(user::Column::Id);
        let total = User::find().filter(condition).count(&self.db);

        // Pages past the addressable offset range hold no rows; only count
        let (items, total) = match page.offset() {
            Some(offset) => tokio::try_join!(
                query.offset(offset).limit(page.limit).all(&self.db),
                total
            ),
            None => total.await.map(|total| (Vec::new(), total)),
        }
        .map_err(|e| InternalError::database("list_users", e))?;

        Ok(Page {
            items,
            request: page,
            total,
        })
    }

    pub async fn create(&self, new_user: NewUser) -> Result<user::Model, InternalError> {
        let now = now_millis();
        let model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(new_user.name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            status: Set(new_user.status),
            role_id: Set(new_user.role_id),
            site_id: Set(new_user.site_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_user", e))
    }

    pub async fn update(
        &self,
        existing: user::Model,
        changes: UserChanges,
    ) -> Result<user::Model, InternalError> {
        let mut model: ActiveModel = existing.into();
        if let Some(name) = changes.name {
            model.name = Set(name);
        }
        if let Some(email) = changes.email {
            model.email = Set(email);
        }
        if let Some(password_hash) = changes.password_hash {
            model.password_hash = Set(password_hash);
        }
        if let Some(status) = changes.status {
            model.status = Set(status);
        }
        if let Some(role_id) = changes.role_id {
            model.role_id = Set(role_id);
        }
        if let Some(site_id) = changes.site_id {
            model.site_id = Set(site_id);
        }
        model.updated_at = Set(now_millis());

        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_user", e))
    }

    /// Count users, optionally restricted to one status
    pub async fn count(&self, status: Option<Status>) -> Result<u64, InternalError> {
        let mut query = User::find();
        if let Some(status) = status {
            query = query.filter(user::Column::Status.eq(status));
        }
        query
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_users", e))
    }

    pub async fn count_by_role(&self, role_id: &str) -> Result<u64, InternalError> {
        User::find()
            .filter(user::Column::RoleId.eq(role_id))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_users_by_role", e))
    }

    pub async fn count_by_site(&self, site_id: &str) -> Result<u64, InternalError> {
        User::find()
            .filter(user::Column::SiteId.eq(site_id))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_users_by_site", e))
    }
}
