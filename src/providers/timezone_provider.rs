use std::time::Duration;

use crate::errors::internal::UpstreamError;
use crate::errors::InternalError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the timezone catalogue from the configured upstream
pub struct TimezoneProvider {
    client: reqwest::Client,
    url: String,
}

impl TimezoneProvider {
    pub fn new(url: impl Into<String>) -> Result<Self, InternalError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| InternalError::parse("http client", e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Return the upstream JSON untouched
    ///
    /// Transport failures, non-2xx statuses and non-JSON bodies all surface
    /// as `UpstreamError::Timezones`. No retries.
    pub async fn fetch(&self) -> Result<serde_json::Value, InternalError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| upstream_failure(&self.url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(upstream_failure(&self.url, format!("status {}", status)));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| upstream_failure(&self.url, e.to_string()))
    }
}

fn upstream_failure(url: &str, reason: String) -> InternalError {
    tracing::warn!("Timezone upstream {} failed: {}", url, reason);
    UpstreamError::Timezones { reason }.into()
}
