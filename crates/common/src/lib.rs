//! Shared types for the battle catalog.

pub mod ids;

pub use ids::{ActorId, BattleId, CharacterId, InvalidId};
