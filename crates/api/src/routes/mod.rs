//! Route handlers, one module per resource.

pub mod actors;
pub mod battles;
pub mod characters;
pub mod system;

use std::str::FromStr;

use catalog::CatalogService;
use catalog_store::CatalogStore;
use common::InvalidId;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: CatalogStore + Clone> {
    pub catalog: CatalogService<S>,
    /// Name of the storage backend, reported by the health check.
    pub backend: &'static str,
}

/// Parses an identifier path segment, rejecting anything but a positive integer.
pub(crate) fn parse_id<T>(raw: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = InvalidId>,
{
    Ok(raw.parse::<T>()?)
}
