use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::errors::internal::ValidationError;
use crate::types::dto::common::{check_paging, PaginationMeta};
use crate::types::internal::validation::FieldValidator;

#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct RoleView {
    pub id: String,
    pub name: String,
    pub description: String,

    /// Permission strings in stored order
    pub permissions: Vec<String>,

    /// System roles cannot be modified or deleted
    pub is_system: bool,

    pub created_at: String,
    pub updated_at: String,
}

#[derive(Object, Debug)]
pub struct RoleEnvelope {
    pub success: bool,
    pub data: RoleView,
}

#[derive(Object, Debug)]
pub struct RoleListEnvelope {
    pub success: bool,
    pub data: Vec<RoleView>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Default, Clone)]
pub struct RoleListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl RoleListQuery {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = FieldValidator::new();
        check_paging(&mut v, self.page, self.limit);
        v.finish()
    }
}

/// Request body for creating a role
#[derive(Object, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateRoleRequest {
    /// 2-100 characters, trimmed, unique
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<Vec<String>>,
}

impl CreateRoleRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = FieldValidator::new();
        if let Some(name) = v.required("name", self.name.as_deref()) {
            v.text("name", name, 2, Some(100));
        }
        v.finish()
    }
}

/// Partial role update
#[derive(Object, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    pub name: Option<String>,

    /// Empty string clears the description
    pub description: Option<String>,

    /// Replaces the whole list when present
    pub permissions: Option<Vec<String>>,
}

impl UpdateRoleRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = FieldValidator::new();
        v.at_least_one_key(
            self.name.is_some() || self.description.is_some() || self.permissions.is_some(),
        );
        if let Some(name) = self.name.as_deref() {
            v.text("name", name, 2, Some(100));
        }
        v.finish()
    }
}
