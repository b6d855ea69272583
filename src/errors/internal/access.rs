use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Insufficient permissions")]
    InsufficientPermissions { missing: Vec<String> },
}
