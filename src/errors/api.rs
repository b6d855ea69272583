use crate::errors::internal::{
    AccessError, CredentialError, InternalError, RoleError, SiteError, UserError,
};
use poem::http::StatusCode;
use poem_openapi::{ApiResponse, Object, payload::Json};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error envelope shared by every endpoint
#[derive(Object, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    /// Always false for errors
    pub success: bool,

    /// Human-readable error message
    pub message: String,

    /// Diagnostic detail, omitted in production
    #[oai(skip_serializing_if_is_none)]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stack: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            stack: None,
        }
    }
}

/// API error returned by every endpoint
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Malformed input or a business rule rejected the request
    #[oai(status = 400)]
    BadRequest(Json<ErrorBody>),

    /// Missing, invalid or expired credentials
    #[oai(status = 401)]
    Unauthorized(Json<ErrorBody>),

    /// Authenticated but not allowed
    #[oai(status = 403)]
    Forbidden(Json<ErrorBody>),

    /// Resource does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),

    /// Unexpected failure
    #[oai(status = 500)]
    InternalServerError(Json<ErrorBody>),

    /// Upstream dependency failed
    #[oai(status = 502)]
    BadGateway(Json<ErrorBody>),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(Json(ErrorBody::new(message)))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(Json(ErrorBody::new(message)))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(Json(ErrorBody::new(message)))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(Json(ErrorBody::new(message)))
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        ApiError::BadGateway(Json(ErrorBody::new(message)))
    }

    /// Create an internal server error carrying the debug rendering of its cause
    ///
    /// The stack is stripped (and the message replaced) by the error formatter
    /// when running in production.
    pub fn internal_server_error(message: impl Into<String>, stack: Option<String>) -> Self {
        ApiError::InternalServerError(Json(ErrorBody {
            success: false,
            message: message.into(),
            stack,
        }))
    }

    /// Convert InternalError to ApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Domain errors keep their message; infrastructure errors are logged and
    /// become 500s.
    pub fn from_internal_error(err: InternalError) -> Self {
        let message = err.to_string();
        match &err {
            // Infrastructure errors - always log
            InternalError::Database(db) => {
                tracing::error!("Database error: {}", db);
                Self::internal_server_error(message, Some(format!("{:?}", err)))
            }
            InternalError::Parse { value_type, .. } => {
                tracing::error!("Parse error for {}: {}", value_type, err);
                Self::internal_server_error(message, Some(format!("{:?}", err)))
            }
            InternalError::Crypto { operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error(message, Some(format!("{:?}", err)))
            }

            InternalError::Credential(CredentialError::InactiveUser) => {
                tracing::debug!("Login attempt by inactive user");
                Self::forbidden(message)
            }
            InternalError::Credential(cred) => {
                tracing::debug!("Credential rejected: {:?}", cred);
                Self::unauthorized(message)
            }

            InternalError::Access(AccessError::NotAuthenticated) => Self::unauthorized(message),
            InternalError::Access(AccessError::InsufficientPermissions { missing }) => {
                tracing::debug!("Missing permissions: {}", missing.join(", "));
                Self::forbidden(message)
            }

            InternalError::User(UserError::NotFound { .. })
            | InternalError::Role(RoleError::NotFound { .. })
            | InternalError::Site(SiteError::NotFound { .. }) => Self::not_found(message),

            InternalError::User(_)
            | InternalError::Role(_)
            | InternalError::Site(_)
            | InternalError::Validation(_) => Self::bad_request(message),

            InternalError::Upstream(upstream) => {
                tracing::warn!("Upstream failure: {:?}", upstream);
                Self::bad_gateway(message)
            }
        }
    }

    fn body(&self) -> &ErrorBody {
        match self {
            ApiError::BadRequest(json)
            | ApiError::Unauthorized(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::InternalServerError(json)
            | ApiError::BadGateway(json) => &json.0,
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.body().message.clone()
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        ApiError::from_internal_error(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
