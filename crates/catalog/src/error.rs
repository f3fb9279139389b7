//! Catalog error types.

use catalog_store::StorageError;
use thiserror::Error;
use views::AssemblyError;

/// Errors returned by catalog queries.
///
/// Only [`CatalogError::NotFound`] is meant to be handled by branching;
/// the other kinds are backend or internal faults.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No row exists for the requested identifier.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The store could not be reached or a query failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Building a view violated an invariant.
    #[error("Assembly error: {0}")]
    Assembly(String),
}

impl CatalogError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<i64>) -> Self {
        CatalogError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Returns true if this error means the requested entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

impl From<AssemblyError> for CatalogError {
    fn from(err: AssemblyError) -> Self {
        match err {
            AssemblyError::Storage(e) => CatalogError::Storage(e),
            AssemblyError::Invariant(msg) => CatalogError::Assembly(msg),
        }
    }
}

/// Result type for catalog queries.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failure_keeps_its_kind_through_assembly() {
        let err: CatalogError =
            AssemblyError::Storage(StorageError::Unavailable("down".to_string())).into();
        assert!(matches!(err, CatalogError::Storage(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn invariant_violation_becomes_assembly_error() {
        let err: CatalogError = AssemblyError::Invariant("duplicate".to_string()).into();
        assert!(matches!(err, CatalogError::Assembly(ref msg) if msg == "duplicate"));
    }

    #[test]
    fn not_found_message() {
        let err = CatalogError::not_found("battle", 999);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "battle 999 not found");
    }
}
