use thiserror::Error;

/// Login and bearer-token failures
///
/// `InvalidCredentials` is shared by "no such email" and "wrong password" so
/// callers cannot probe for registered accounts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User is inactive")]
    InactiveUser,

    #[error("Authentication token missing")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    ExpiredToken,

    #[error("User not found or inactive")]
    UserUnavailable,
}
