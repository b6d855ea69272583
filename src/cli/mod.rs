// CLI module for administrative operations that run without the HTTP server

pub mod migrate;
pub mod seed;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;
use crate::config::AppSettings;

/// Tenant console backend
#[derive(Parser, Debug)]
#[command(name = "tenant_console")]
#[command(about = "Multi-tenant admin console backend", long_about = None)]
pub struct Cli {
    /// Defaults to `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Create the Admin role and the configured admin account if missing
    SeedAdmin,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}

/// Execute a one-shot CLI command
///
/// `Serve` is handled by main and is a no-op here.
pub async fn execute_command(
    command: Commands,
    settings: AppSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve => {}
        Commands::Migrate => {
            migrate::run_migrations(settings.database_url()).await?;
        }
        Commands::SeedAdmin => {
            let db = crate::config::connect_database(settings.database_url()).await?;
            crate::config::migrate_database(&db).await?;
            let app_data = Arc::new(AppData::init(db, settings)?);
            seed::seed_admin(app_data).await?;
        }
    }

    Ok(())
}
