use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::errors::internal::DatabaseError;
use crate::errors::InternalError;

/// Open the main database connection pool
///
/// Does NOT run migrations - call `migrate_database()` separately.
pub async fn connect_database(database_url: &str) -> Result<DatabaseConnection, InternalError> {
    let db = Database::connect(database_url)
        .await
        .map_err(|source| InternalError::Database(DatabaseError::Connect { source }))?;

    tracing::debug!("Connected to database: {}", database_url);

    Ok(db)
}

/// Apply all pending migrations
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    tracing::info!("Running database migrations");

    Migrator::up(db, None)
        .await
        .map_err(|source| InternalError::Database(DatabaseError::Migration { source }))?;

    tracing::info!("Database migrations complete");
    Ok(())
}
