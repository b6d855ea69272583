use thiserror::Error;

pub mod access;
pub mod credential;
pub mod database;
pub mod role;
pub mod site;
pub mod upstream;
pub mod user;
pub mod validation;

pub use access::AccessError;
pub use credential::CredentialError;
pub use database::DatabaseError;
pub use role::RoleError;
pub use site::SiteError;
pub use upstream::UpstreamError;
pub use user::UserError;
pub use validation::ValidationError;

/// Internal error type for store, provider and service operations
///
/// Hybrid design separates infrastructure errors (shared) from domain errors
/// (one enum per resource). Not exposed via API - endpoints convert to
/// `ApiError` through `ApiError::from_internal_error`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Role(#[from] RoleError),

    #[error(transparent)]
    Site(#[from] SiteError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> Self {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        InternalError::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        InternalError::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Whether a write was rejected by a unique index
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, InternalError::Database(db) if db.is_unique_violation())
    }
}
