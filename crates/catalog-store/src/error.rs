use thiserror::Error;

/// Errors that can occur when reading from the catalog store.
///
/// A missing row is never an error: lookups return `None` or an empty list.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A database error occurred, including pool acquire timeouts.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A fixture referenced a row that was never loaded.
    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    /// The backend could not serve the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for catalog store operations.
pub type Result<T> = std::result::Result<T, StorageError>;
