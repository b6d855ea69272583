use thiserror::Error;

/// Startup configuration failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Required environment variable {name} is missing")]
    MissingRequired { name: String },

    #[error("Environment variable {name} has an invalid value: {reason}")]
    InvalidValue { name: String, reason: String },
}

impl ConfigError {
    pub fn missing(name: &str) -> Self {
        ConfigError::MissingRequired {
            name: name.to_string(),
        }
    }

    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
