//! View assembly for the battle catalog.
//!
//! Turns normalized catalog rows into nested, acyclic read views:
//! - [`BattleView`] → [`CharacterView`] → [`ActorView`], with actors resolved
//!   per battle through the portrayal relation
//! - [`BattleSummary`] for listings that only need identity and name
//! - [`ActorProjection`] selecting which actor fields a context carries

pub mod assembler;
pub mod error;
pub mod projection;
pub mod view;

pub use assembler::{
    MAX_CONCURRENT_FETCHES, ViewAssembler, build_battle_view, project_actor, project_character,
};
pub use error::{AssemblyError, Result};
pub use projection::ActorProjection;
pub use view::{ActorView, BattleSummary, BattleView, CharacterView, SocialMediaLink};
