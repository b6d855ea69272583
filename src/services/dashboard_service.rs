use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::stores::{RoleStore, SiteStore, UserStore};
use crate::types::db::Status;
use crate::types::dto::dashboard::DashboardStats;

/// Overview counts for the dashboard. Not cached.
pub struct DashboardService {
    user_store: Arc<UserStore>,
    role_store: Arc<RoleStore>,
    site_store: Arc<SiteStore>,
}

impl DashboardService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: Arc::clone(&app_data.user_store),
            role_store: Arc::clone(&app_data.role_store),
            site_store: Arc::clone(&app_data.site_store),
        }
    }

    /// Issue all four counts at once and wait for every one of them
    pub async fn stats(&self) -> Result<DashboardStats, InternalError> {
        let (total_users, active_users, total_roles, total_sites) = tokio::try_join!(
            self.user_store.count(None),
            self.user_store.count(Some(Status::Active)),
            self.role_store.count(),
            self.site_store.count(),
        )?;

        Ok(DashboardStats {
            total_users,
            active_users,
            total_roles,
            total_sites,
        })
    }
}
