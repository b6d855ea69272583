use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {operation} failed: {source}")]
    Operation {
        operation: String,
        #[source]
        source: DbErr,
    },

    #[error("Database connection failed: {source}")]
    Connect {
        #[source]
        source: DbErr,
    },

    #[error("Database migration failed: {source}")]
    Migration {
        #[source]
        source: DbErr,
    },
}

impl DatabaseError {
    /// Whether the underlying driver rejected a write on a unique index.
    pub fn is_unique_violation(&self) -> bool {
        let source = match self {
            DatabaseError::Operation { source, .. } => source,
            DatabaseError::Connect { source } | DatabaseError::Migration { source } => source,
        };
        matches!(source.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }
}
