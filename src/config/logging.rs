use std::path::{Path, PathBuf};

use super::env_provider::{EnvironmentProvider, SystemEnvironment};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Configuration for application logging
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
    pub app_log_file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Load logging configuration from `LOG_LEVEL` and `APP_LOG_FILE`
    ///
    /// `LOG_LEVEL` accepts any `EnvFilter` directive, e.g.
    /// `info,tenant_console=debug,sea_orm=warn`.
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Self {
        let log_level = env
            .get_var("LOG_LEVEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        let app_log_file = env
            .get_var("APP_LOG_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self {
            log_level,
            app_log_file,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize logging: {0}")]
    InitializationError(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("File system error: {0}")]
    FileSystemError(#[from] std::io::Error),
}

/// Initialize the tracing subscriber with console and optional file output
///
/// The file layer rolls daily and never carries ANSI colour codes.
pub fn init_logging() -> Result<(), LoggingError> {
    init_logging_with(&LoggingConfig::from_env_provider(&SystemEnvironment))
}

pub fn init_logging_with(config: &LoggingConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| LoggingError::InvalidLogLevel(format!("{}: {}", config.log_level, e)))?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(env_filter.clone());

    let file_layer = match &config.app_log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(directory)?;
            let file_name = path.file_name().ok_or_else(|| {
                LoggingError::InitializationError(format!(
                    "APP_LOG_FILE has no file name: {}",
                    path.display()
                ))
            })?;

            Some(
                fmt::layer()
                    .with_writer(tracing_appender::rolling::daily(directory, file_name))
                    .with_target(true)
                    .with_ansi(false)
                    .with_line_number(true)
                    .with_filter(env_filter),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::InitializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    #[test]
    fn test_logging_defaults() {
        let config = LoggingConfig::from_env_provider(&MockEnvironment::empty());
        assert_eq!(config.log_level, "info");
        assert!(config.app_log_file.is_none());
    }

    #[test]
    fn test_logging_overrides() {
        let env = MockEnvironment::empty().with_vars(&[
            ("LOG_LEVEL", "debug,sea_orm=warn"),
            ("APP_LOG_FILE", "logs/console.log"),
        ]);
        let config = LoggingConfig::from_env_provider(&env);
        assert_eq!(config.log_level, "debug,sea_orm=warn");
        assert_eq!(config.app_log_file, Some(PathBuf::from("logs/console.log")));
        assert!(EnvFilter::try_new(&config.log_level).is_ok());
    }
}
