use std::fmt;

use super::env_provider::{EnvironmentProvider, SystemEnvironment};
use super::errors::ConfigError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_URL: &str = "sqlite://tenant_console.db?mode=rwc";
const DEFAULT_JWT_EXPIRES_IN: &str = "1d";
const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_TIMEZONE_API_URL: &str = "https://timeapi.io/api/TimeZone/AvailableTimeZones";
const DEFAULT_SEED_ADMIN_EMAIL: &str = "admin@tenantapp.local";
const DEFAULT_SEED_ADMIN_PASSWORD: &str = "Admin@123";

/// Deployment environment. Production hides internal error detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
    Test,
}

impl AppEnv {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnv::Development),
            "production" | "prod" => Ok(AppEnv::Production),
            "test" => Ok(AppEnv::Test),
            other => Err(ConfigError::invalid(
                "APP_ENV",
                format!("expected development, production or test, got '{}'", other),
            )),
        }
    }
}

/// Runtime settings resolved once at startup
#[derive(Clone)]
pub struct AppSettings {
    env: AppEnv,
    host: String,
    port: u16,
    database_url: String,
    jwt_secret: String,
    jwt_expires_in_secs: i64,
    client_origin: String,
    timezone_api_url: String,
    seed_admin_email: String,
    seed_admin_password: String,
}

impl AppSettings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_provider(&SystemEnvironment)
    }

    /// Load settings through an injectable environment source
    ///
    /// `JWT_SECRET` is the only required variable; everything else has a
    /// development default.
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, ConfigError> {
        let get = |key: &str| env.get_var(key).filter(|v| !v.trim().is_empty());

        let app_env = match get("APP_ENV") {
            Some(value) => AppEnv::parse(&value)?,
            None => AppEnv::Development,
        };

        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("PORT", e.to_string()))?,
            None => DEFAULT_PORT,
        };

        let jwt_secret = get("JWT_SECRET").ok_or_else(|| ConfigError::missing("JWT_SECRET"))?;

        let jwt_expires_in_secs = parse_duration_secs(
            &get("JWT_EXPIRES_IN").unwrap_or_else(|| DEFAULT_JWT_EXPIRES_IN.to_string()),
        )
        .map_err(|reason| ConfigError::invalid("JWT_EXPIRES_IN", reason))?;

        Ok(Self {
            env: app_env,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_expires_in_secs,
            client_origin: get("CLIENT_ORIGIN")
                .unwrap_or_else(|| DEFAULT_CLIENT_ORIGIN.to_string()),
            timezone_api_url: get("TIMEZONE_API_URL")
                .unwrap_or_else(|| DEFAULT_TIMEZONE_API_URL.to_string()),
            seed_admin_email: get("SEED_ADMIN_EMAIL")
                .unwrap_or_else(|| DEFAULT_SEED_ADMIN_EMAIL.to_string()),
            seed_admin_password: get("SEED_ADMIN_PASSWORD")
                .unwrap_or_else(|| DEFAULT_SEED_ADMIN_PASSWORD.to_string()),
        })
    }

    pub fn env(&self) -> AppEnv {
        self.env
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnv::Production
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn jwt_expires_in_secs(&self) -> i64 {
        self.jwt_expires_in_secs
    }

    pub fn client_origin(&self) -> &str {
        &self.client_origin
    }

    pub fn timezone_api_url(&self) -> &str {
        &self.timezone_api_url
    }

    pub fn seed_admin_email(&self) -> &str {
        &self.seed_admin_email
    }

    pub fn seed_admin_password(&self) -> &str {
        &self.seed_admin_password
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("env", &self.env)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expires_in_secs", &self.jwt_expires_in_secs)
            .field("client_origin", &self.client_origin)
            .field("timezone_api_url", &self.timezone_api_url)
            .field("seed_admin_email", &self.seed_admin_email)
            .field("seed_admin_password", &"[REDACTED]")
            .finish()
    }
}

/// Parse `30s`, `15m`, `12h`, `7d` or a bare number of seconds
fn parse_duration_secs(value: &str) -> Result<i64, String> {
    let value = value.trim();
    let (digits, multiplier) = match value.chars().last() {
        Some('s') => (&value[..value.len() - 1], 1),
        Some('m') => (&value[..value.len() - 1], 60),
        Some('h') => (&value[..value.len() - 1], 60 * 60),
        Some('d') => (&value[..value.len() - 1], 24 * 60 * 60),
        _ => (value, 1),
    };
    let amount: i64 = digits
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a duration like 30s, 15m, 12h or 1d", value))?;
    if amount <= 0 {
        return Err(format!("'{}' must be positive", value));
    }
    amount
        .checked_mul(multiplier)
        .ok_or_else(|| format!("'{}' is too large", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    #[test]
    fn test_defaults() {
        let env = MockEnvironment::empty().with_var("JWT_SECRET", "secret");
        let settings = AppSettings::from_env_provider(&env).unwrap();

        assert_eq!(settings.env(), AppEnv::Development);
        assert_eq!(settings.bind_address(), "0.0.0.0:5000");
        assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(settings.jwt_expires_in_secs(), 86_400);
        assert_eq!(settings.client_origin(), "http://localhost:5173");
        assert_eq!(settings.timezone_api_url(), DEFAULT_TIMEZONE_API_URL);
        assert_eq!(settings.seed_admin_password(), "Admin@123");
        assert!(!settings.is_production());
    }

    #[test]
    fn test_missing_secret_fails() {
        let err = AppSettings::from_env_provider(&MockEnvironment::empty()).unwrap_err();
        assert_eq!(err, ConfigError::missing("JWT_SECRET"));
    }

    #[test]
    fn test_blank_secret_counts_as_missing() {
        let env = MockEnvironment::empty().with_var("JWT_SECRET", "  ");
        assert!(matches!(
            AppSettings::from_env_provider(&env),
            Err(ConfigError::MissingRequired { .. })
        ));
    }

    #[test]
    fn test_bad_port() {
        let env = MockEnvironment::empty().with_vars(&[("JWT_SECRET", "s"), ("PORT", "http")]);
        match AppSettings::from_env_provider(&env) {
            Err(ConfigError::InvalidValue { name, .. }) => assert_eq!(name, "PORT"),
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_app_env() {
        let env = MockEnvironment::empty().with_vars(&[("JWT_SECRET", "s"), ("APP_ENV", "staging")]);
        assert!(matches!(
            AppSettings::from_env_provider(&env),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let env = MockEnvironment::empty().with_vars(&[
            ("JWT_SECRET", "s"),
            ("APP_ENV", "production"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("JWT_EXPIRES_IN", "15m"),
            ("SEED_ADMIN_EMAIL", "root@example.com"),
        ]);
        let settings = AppSettings::from_env_provider(&env).unwrap();

        assert!(settings.is_production());
        assert_eq!(settings.bind_address(), "127.0.0.1:8080");
        assert_eq!(settings.jwt_expires_in_secs(), 900);
        assert_eq!(settings.seed_admin_email(), "root@example.com");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration_secs("45"), Ok(45));
        assert_eq!(parse_duration_secs("30s"), Ok(30));
        assert_eq!(parse_duration_secs("2h"), Ok(7_200));
        assert_eq!(parse_duration_secs("7d"), Ok(604_800));
        assert!(parse_duration_secs("abc").is_err());
        assert!(parse_duration_secs("0").is_err());
        assert!(parse_duration_secs("-5m").is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let env = MockEnvironment::empty().with_var("JWT_SECRET", "super-secret-value");
        let settings = AppSettings::from_env_provider(&env).unwrap();
        let rendered = format!("{:?}", settings);

        assert!(!rendered.contains("super-secret-value"));
        assert!(!rendered.contains("Admin@123"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
