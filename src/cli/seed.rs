use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::services::{AuthService, SeedOutcome};

/// Seed the Admin role and admin account, printing what happened
pub async fn seed_admin(app_data: Arc<AppData>) -> Result<SeedOutcome, InternalError> {
    let email = app_data.settings.seed_admin_email().to_string();
    let outcome = AuthService::new(app_data).seed_admin().await?;

    println!("\n=== Admin Seed ===\n");
    println!(
        "Admin role:    {}",
        if outcome.role_created { "created" } else { "already present" }
    );
    println!(
        "Admin account: {} ({})",
        email,
        if outcome.user_created { "created" } else { "already present" }
    );

    Ok(outcome)
}
