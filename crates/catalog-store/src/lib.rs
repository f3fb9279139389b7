//! Storage gateway for the battle catalog.
//!
//! Exposes the read operations the catalog needs through the [`CatalogStore`]
//! trait, with an in-memory implementation for tests and a PostgreSQL one.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod rows;
pub mod store;

pub use common::{ActorId, BattleId, CharacterId};
pub use error::{Result, StorageError};
pub use memory::InMemoryCatalogStore;
pub use postgres::PostgresCatalogStore;
pub use rows::{ActorRow, BattleRow, CharacterRow, SocialMediaRow};
pub use store::{CatalogStore, CatalogStoreExt};
