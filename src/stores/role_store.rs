use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::stores::{contains_ignore_case, now_millis};
use crate::types::db::role::{self, ActiveModel, Entity as Role};
use crate::types::internal::pagination::{Page, PageRequest};

/// Filters accepted by `RoleStore::list`
#[derive(Debug, Default, Clone)]
pub struct RoleFilter {
    /// Case-insensitive substring over name and description
    pub search: Option<String>,
}

/// Fields for a new role row
#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
    pub is_system: bool,
}

/// Changes to apply to an existing role. `None` leaves a column alone.
#[derive(Debug, Default, Clone)]
pub struct RoleChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<Vec<String>>,
}

/// RoleStore manages role rows and their permission lists
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<role::Model>, InternalError> {
        Role::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_role_by_id", e))
    }

    /// Exact, case-sensitive name lookup
    pub async fn find_by_name(&self, name: &str) -> Result<Option<role::Model>, InternalError> {
        Role::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_role_by_name", e))
    }

    /// Batch lookup used to populate user views
    pub async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<role::Model>, InternalError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Role::find()
            .filter(role::Column::Id.is_in(ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_roles_by_ids", e))
    }

    /// Newest-first page of roles plus the total matching the filter
    ///
    /// The page query and the count run concurrently.
    pub async fn list(
        &self,
        filter: &RoleFilter,
        page: PageRequest,
    ) -> Result<Page<role::Model>, InternalError> {
        let mut condition = Condition::all();
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            condition = condition.add(
                Condition::any()
                    .add(contains_ignore_case(role::Column::Name, search))
                    .add(contains_ignore_case(role::Column::Description, search)),
            );
        }

        let query = Role::find()
            .filter(condition.clone())
            .order_by_desc(role::Column::CreatedAt)
            .order_by_desc(role::Column::Id);
        let total = Role::find().filter(condition).count(&self.db);

        // Pages past the addressable offset range hold no rows; only count
        let (items, total) = match page.offset() {
            Some(offset) => tokio::try_join!(
                query.offset(offset).limit(page.limit).all(&self.db),
                total
            ),
            None => total.await.map(|total| (Vec::new(), total)),
        }
        .map_err(|e| InternalError::database("list_roles", e))?;

        Ok(Page {
            items,
            request: page,
            total,
        })
    }

    pub async fn create(&self, new_role: NewRole) -> Result<role::Model, InternalError> {
        let permissions = encode_permissions(&new_role.permissions)?;
        let now = now_millis();

        let model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(new_role.name),
            description: Set(new_role.description),
            permissions: Set(permissions),
            is_system: Set(new_role.is_system),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_role", e))
    }

    pub async fn update(
        &self,
        existing: role::Model,
        changes: RoleChanges,
    ) -> Result<role::Model, InternalError> {
        let mut model: ActiveModel = existing.into();
        if let Some(name) = changes.name {
            model.name = Set(name);
        }
        if let Some(description) = changes.description {
            model.description = Set(description);
        }
        if let Some(permissions) = changes.permissions {
            model.permissions = Set(encode_permissions(&permissions)?);
        }
        model.updated_at = Set(now_millis());

        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_role", e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        Role::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_role", e))?;
        Ok(())
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        Role::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_roles", e))
    }
}

/// Decode the stored JSON permission array
pub fn decode_permissions(model: &role::Model) -> Result<Vec<String>, InternalError> {
    serde_json::from_str(&model.permissions)
        .map_err(|e| InternalError::parse("role permissions", e.to_string()))
}

fn encode_permissions(permissions: &[String]) -> Result<String, InternalError> {
    serde_json::to_string(permissions)
        .map_err(|e| InternalError::parse("role permissions", e.to_string()))
}
