use poem_openapi::types::MaybeUndefined;
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::errors::internal::ValidationError;
use crate::types::db::Status;
use crate::types::dto::common::{check_paging, check_status};
use crate::types::internal::validation::FieldValidator;

/// Role summary embedded in a user view
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRef {
    pub id: String,
    pub name: String,
}

/// Site summary embedded in a user view
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRef {
    pub id: String,
    pub name: String,
    pub location: String,
}

/// User as returned by the API. Never carries the password hash.
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: Status,

    /// None only if the referenced role row is gone
    pub role: Option<RoleRef>,
    pub site: Option<SiteRef>,

    pub created_at: String,
    pub updated_at: String,
}

#[derive(Object, Debug)]
pub struct UserEnvelope {
    pub success: bool,
    pub data: UserView,
}

#[derive(Object, Debug)]
pub struct UserListEnvelope {
    pub success: bool,
    pub data: Vec<UserView>,
    pub pagination: super::common::PaginationMeta,
}

/// Query string accepted by the user list endpoint
#[derive(Debug, Default, Clone)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub site: Option<String>,
    pub role: Option<String>,
}

impl UserListQuery {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = FieldValidator::new();
        check_paging(&mut v, self.page, self.limit);
        check_status(&mut v, self.status.as_deref());
        if let Some(site) = self.site.as_deref() {
            v.id("site", site);
        }
        if let Some(role) = self.role.as_deref() {
            v.id("role", role);
        }
        v.finish()
    }
}

/// Request body for creating a user
#[derive(Object, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// 2-100 characters, trimmed
    pub name: Option<String>,
    pub email: Option<String>,

    /// At least 6 characters
    pub password: Option<String>,

    /// Role id
    pub role: Option<String>,

    /// Site id; null or empty string means no site
    pub site: Option<String>,

    /// `active` (default) or `inactive`
    pub status: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = FieldValidator::new();
        if let Some(name) = v.required("name", self.name.as_deref()) {
            v.text("name", name, 2, Some(100));
        }
        if let Some(email) = v.required("email", self.email.as_deref()) {
            v.email("email", email);
        }
        if let Some(password) = v.required("password", self.password.as_deref()) {
            v.min_length("password", password, 6);
        }
        if let Some(role) = v.required("role", self.role.as_deref()) {
            v.id("role", role);
        }
        if let Some(site) = self.site.as_deref().filter(|s| !s.is_empty()) {
            v.id("site", site);
        }
        check_status(&mut v, self.status.as_deref());
        v.finish()
    }
}

/// Partial update; absent fields are left alone
#[derive(Object, Debug, Default, Clone)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,

    /// null or empty string clears the site
    pub site: MaybeUndefined<String>,

    pub status: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = FieldValidator::new();
        v.at_least_one_key(
            self.name.is_some()
                || self.email.is_some()
                || self.password.is_some()
                || self.role.is_some()
                || !self.site.is_undefined()
                || self.status.is_some(),
        );
        if let Some(name) = self.name.as_deref() {
            v.text("name", name, 2, Some(100));
        }
        if let Some(email) = self.email.as_deref() {
            v.email("email", email);
        }
        if let Some(password) = self.password.as_deref() {
            v.min_length("password", password, 6);
        }
        if let Some(role) = self.role.as_deref() {
            v.id("role", role);
        }
        if let MaybeUndefined::Value(site) = &self.site {
            if !site.is_empty() {
                v.id("site", site);
            }
        }
        check_status(&mut v, self.status.as_deref());
        v.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateUserRequest {
        CreateUserRequest {
            name: Some("Alice".to_string()),
            email: Some("alice@example.com".to_string()),
            password: Some("secret1".to_string()),
            role: Some(uuid::Uuid::new_v4().to_string()),
            site: None,
            status: None,
        }
    }

    #[test]
    fn test_create_valid() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_create_allows_empty_site() {
        let req = CreateUserRequest {
            site: Some(String::new()),
            ..valid_create()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_aggregates_every_problem() {
        let req = CreateUserRequest {
            name: Some("A".to_string()),
            email: Some("bad".to_string()),
            password: None,
            role: Some("not-an-id".to_string()),
            site: Some("also-bad".to_string()),
            status: Some("paused".to_string()),
        };
        assert_eq!(
            req.validate().unwrap_err().to_string(),
            "\"name\" length must be at least 2 characters long, \
             \"email\" must be a valid email, \
             \"password\" is required, \
             \"role\" contains an invalid value, \
             \"site\" contains an invalid value, \
             \"status\" must be one of [active, inactive]"
        );
    }

    #[test]
    fn test_update_requires_a_field() {
        assert_eq!(
            UpdateUserRequest::default().validate().unwrap_err().to_string(),
            "\"value\" must have at least 1 key"
        );
    }

    #[test]
    fn test_update_null_site_counts_as_a_field() {
        let req = UpdateUserRequest {
            site: MaybeUndefined::Null,
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_list_query_rejects_large_limit() {
        let query = UserListQuery {
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(
            query.validate().unwrap_err().to_string(),
            "\"limit\" must be less than or equal to 100"
        );
    }
}
