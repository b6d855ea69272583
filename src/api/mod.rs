// API layer - HTTP endpoints
pub mod auth;
pub mod dashboard;
pub mod error_formatter;
pub mod health;
pub mod roles;
pub mod sites;
pub mod timezones;
pub mod users;

use std::sync::Arc;

use poem::endpoint::BoxEndpoint;
use poem::middleware::{Cors, SetHeader, Tracing};
use poem::{EndpointExt, Route};
use poem_openapi::OpenApiService;

pub use auth::AuthApi;
pub use dashboard::DashboardApi;
pub use error_formatter::ErrorFormatter;
pub use health::HealthApi;
pub use roles::RolesApi;
pub use sites::SitesApi;
pub use timezones::TimezonesApi;
pub use users::UsersApi;

use crate::app_data::AppData;
use crate::errors::internal::ValidationError;
use crate::errors::ApiError;

/// Assemble the full route tree with middleware applied
///
/// ```text
/// /health          HealthApi
/// /api/...         resource APIs
/// /docs            Swagger UI
/// /openapi.json    OpenAPI document
/// ```
pub fn build_app(app_data: Arc<AppData>) -> BoxEndpoint<'static> {
    let settings = Arc::clone(&app_data.settings);

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(app_data.clone()),
            UsersApi::new(app_data.clone()),
            RolesApi::new(app_data.clone()),
            SitesApi::new(app_data.clone()),
            TimezonesApi::new(app_data.clone()),
            DashboardApi::new(app_data),
        ),
        "Tenant Console API",
        env!("CARGO_PKG_VERSION"),
    );
    let ui = api_service.swagger_ui();
    let openapi_doc = api_service.spec_endpoint();

    Route::new()
        .nest("/docs", ui)
        .at("/openapi.json", openapi_doc)
        .nest("/", api_service)
        .with(ErrorFormatter::new(settings.is_production()))
        .with(
            SetHeader::new()
                .overriding("X-Content-Type-Options", "nosniff")
                .overriding("X-Frame-Options", "DENY")
                .overriding("Referrer-Policy", "no-referrer"),
        )
        .with(
            Cors::new()
                .allow_origin(settings.client_origin())
                .allow_credentials(true),
        )
        .with(Tracing)
        .boxed()
}

/// Request-shape failures become 400s with the aggregated message
pub(crate) fn invalid(err: ValidationError) -> ApiError {
    ApiError::from_internal_error(err.into())
}
