//! View assembly error types.

use catalog_store::StorageError;
use thiserror::Error;

/// Errors that abort the assembly of a view.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// A fetch from the catalog store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The fetched rows cannot form a valid view.
    #[error("Assembly invariant violated: {0}")]
    Invariant(String),
}

/// Result type for view assembly.
pub type Result<T> = std::result::Result<T, AssemblyError>;
