// Services layer - Business logic and orchestration
pub mod auth_service;
pub mod dashboard_service;
pub mod role_service;
pub mod site_service;
pub mod user_service;

pub use auth_service::{AuthService, SeedOutcome};
pub use dashboard_service::DashboardService;
pub use role_service::RoleService;
pub use site_service::SiteService;
pub use user_service::UserService;
