use crate::config::{connect_database, migrate_database};
use crate::errors::InternalError;

/// Run database migrations
///
/// Connects and migrates without building the full AppData structure.
pub async fn run_migrations(database_url: &str) -> Result<(), InternalError> {
    tracing::info!("Running database migrations...");

    let db = connect_database(database_url).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");
    Ok(())
}
