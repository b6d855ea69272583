use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::errors::internal::ValidationError;
use crate::types::db::Status;
use crate::types::dto::common::{check_paging, check_status, PaginationMeta};
use crate::types::internal::validation::FieldValidator;

#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct SiteView {
    pub id: String,
    pub name: String,
    pub location: String,

    /// IANA timezone identifier
    pub timezone: String,

    pub status: Status,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Object, Debug)]
pub struct SiteEnvelope {
    pub success: bool,
    pub data: SiteView,
}

#[derive(Object, Debug)]
pub struct SiteListEnvelope {
    pub success: bool,
    pub data: Vec<SiteView>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Default, Clone)]
pub struct SiteListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl SiteListQuery {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = FieldValidator::new();
        check_paging(&mut v, self.page, self.limit);
        check_status(&mut v, self.status.as_deref());
        v.finish()
    }
}

#[derive(Object, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateSiteRequest {
    /// 2-200 characters, trimmed
    pub name: Option<String>,
    pub location: Option<String>,
    pub timezone: Option<String>,
    pub status: Option<String>,
}

impl CreateSiteRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = FieldValidator::new();
        if let Some(name) = v.required("name", self.name.as_deref()) {
            v.text("name", name, 2, Some(200));
        }
        check_status(&mut v, self.status.as_deref());
        v.finish()
    }
}

#[derive(Object, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateSiteRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub timezone: Option<String>,
    pub status: Option<String>,
}

impl UpdateSiteRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = FieldValidator::new();
        v.at_least_one_key(
            self.name.is_some()
                || self.location.is_some()
                || self.timezone.is_some()
                || self.status.is_some(),
        );
        if let Some(name) = self.name.as_deref() {
            v.text("name", name, 2, Some(200));
        }
        check_status(&mut v, self.status.as_deref());
        v.finish()
    }
}
