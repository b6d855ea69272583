use std::sync::Arc;

use poem::Request;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::app_data::AppData;
use crate::auth::permissions::DASHBOARD_READ;
use crate::auth::Authenticator;
use crate::errors::ApiError;
use crate::services::DashboardService;
use crate::types::dto::dashboard::DashboardEnvelope;

pub struct DashboardApi {
    authenticator: Authenticator,
    dashboard_service: DashboardService,
}

impl DashboardApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authenticator: Authenticator::new(app_data.clone()),
            dashboard_service: DashboardService::new(app_data),
        }
    }
}

#[derive(Tags)]
enum DashboardTags {
    /// Overview statistics
    Dashboard,
}

#[OpenApi(prefix_path = "/api")]
impl DashboardApi {
    /// User, role and site counts
    #[oai(path = "/dashboard", method = "get", tag = "DashboardTags::Dashboard")]
    async fn stats(&self, req: &Request) -> Result<Json<DashboardEnvelope>, ApiError> {
        self.authenticator.authorize(req, &[DASHBOARD_READ]).await?;

        let stats = self.dashboard_service.stats().await?;
        Ok(Json(DashboardEnvelope {
            success: true,
            data: stats,
        }))
    }
}
