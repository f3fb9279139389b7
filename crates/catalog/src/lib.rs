//! Query facade for the battle catalog.
//!
//! [`CatalogService`] composes a [`catalog_store::CatalogStore`] with the
//! [`views::ViewAssembler`] into the read use cases the presentation layer
//! calls. Every operation is stateless and side-effect free.

pub mod error;
pub mod service;

pub use error::{CatalogError, Result};
pub use service::{CatalogService, CharacterPage};
pub use views::{ActorProjection, ActorView, BattleSummary, BattleView, CharacterView};
