use std::sync::Arc;

use poem::Request;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::app_data::AppData;
use crate::auth::permissions::{SITES_READ, USERS_CREATE};
use crate::auth::Authenticator;
use crate::errors::ApiError;
use crate::providers::TimezoneProvider;
use crate::types::dto::timezone::TimezoneEnvelope;

/// Pass-through to the upstream timezone catalogue
pub struct TimezonesApi {
    authenticator: Authenticator,
    timezone_provider: Arc<TimezoneProvider>,
}

impl TimezonesApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authenticator: Authenticator::new(app_data.clone()),
            timezone_provider: Arc::clone(&app_data.timezone_provider),
        }
    }
}

#[derive(Tags)]
enum TimezoneTags {
    /// Timezone lookup
    Timezones,
}

#[OpenApi(prefix_path = "/api")]
impl TimezonesApi {
    /// Requires both `sites:read` and `users:create`
    #[oai(path = "/timezones", method = "get", tag = "TimezoneTags::Timezones")]
    async fn list(&self, req: &Request) -> Result<Json<TimezoneEnvelope>, ApiError> {
        self.authenticator
            .authorize(req, &[SITES_READ, USERS_CREATE])
            .await?;

        let data = self.timezone_provider.fetch().await?;
        Ok(Json(envelope(data)))
    }
}

fn envelope(data: serde_json::Value) -> TimezoneEnvelope {
    let count = data.as_array().map(|entries| entries.len() as u64);
    TimezoneEnvelope {
        success: true,
        count,
        data,
    }
}
