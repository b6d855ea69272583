use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::types::internal::auth::Claims;

/// Issues and verifies HS256 access tokens
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in_secs: i64,
}

impl TokenProvider {
    pub fn new(secret: &str, expires_in_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in_secs,
        }
    }

    /// Sign a token for the user with a snapshot of the role's permissions
    pub fn issue(
        &self,
        user_id: &str,
        role_id: &str,
        permissions: Vec<String>,
    ) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            role_id: role_id.to_string(),
            permissions,
            iat: now,
            exp: now + self.expires_in_secs,
        };
        self.encode(&claims)
    }

    pub(crate) fn encode(&self, claims: &Claims) -> Result<String, InternalError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| InternalError::crypto("jwt_generation", format!("Failed to generate JWT: {}", e)))
    }

    /// Verify signature and expiry and return the claims
    ///
    /// Expiry is checked with zero leeway.
    pub fn verify(&self, token: &str) -> Result<Claims, InternalError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => CredentialError::ExpiredToken.into(),
                _ => {
                    tracing::debug!("Rejected token: {}", e);
                    CredentialError::InvalidToken.into()
                }
            })
    }
}
