use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("User not found")]
    NotFound { user_id: String },

    #[error("Email already in use")]
    EmailInUse { email: String },

    #[error("Invalid role")]
    InvalidRole { role_id: String },

    #[error("Invalid site")]
    InvalidSite { site_id: String },
}
