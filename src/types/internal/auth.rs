use serde::{Deserialize, Serialize};

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Subject (user_id)
    pub sub: String,

    /// Role the user held when the token was issued
    pub role_id: String,

    /// Permission snapshot at issuance. Informational only; every request
    /// re-reads the live role.
    pub permissions: Vec<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}
