use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::errors::internal::ValidationError;
use crate::types::internal::validation::FieldValidator;

/// Request model for user login
#[derive(Object, Debug, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email (exact match)
    pub email: Option<String>,

    /// Account password
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = FieldValidator::new();
        if let Some(email) = v.required("email", self.email.as_deref()) {
            v.email("email", email);
        }
        if let Some(password) = v.required("password", self.password.as_deref()) {
            v.min_length("password", password, 6);
        }
        v.finish()
    }
}

/// Identity returned alongside a freshly issued token
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role_id: String,
    pub role_name: Option<String>,

    /// Permission snapshot for client-side rendering decisions
    pub permissions: Vec<String>,
}

/// Token plus identity
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    /// HS256 JWT to send as `Authorization: Bearer <token>`
    pub token: String,
    pub user: LoginUser,
}

#[derive(Object, Debug)]
pub struct LoginEnvelope {
    pub success: bool,
    pub data: LoginResult,
}
