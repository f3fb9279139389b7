//! Read views handed to callers.
//!
//! Views are derived from rows on every query and own no persistent state.

use chrono::NaiveDate;
use common::{ActorId, BattleId, CharacterId};
use serde::Serialize;

/// A battle with its characters and, per character, the actors who played
/// them in this battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleView {
    pub id: BattleId,
    pub name: String,
    pub duration_seconds: i32,
    pub publication_date: NaiveDate,
    pub lyrics: Option<String>,
    pub youtube_link: Option<String>,
    pub spotify_link: Option<String>,
    pub image: Option<String>,
    /// Ordered by character id.
    pub characters: Vec<CharacterView>,
}

impl BattleView {
    /// Finds a character of this battle by id.
    pub fn character(&self, id: CharacterId) -> Option<&CharacterView> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Iterates over every actor in the battle, across all characters.
    pub fn actors(&self) -> impl Iterator<Item = &ActorView> {
        self.characters
            .iter()
            .flat_map(|c| c.actors.iter().flatten())
    }
}

/// Identity and name of a battle, without nested characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleSummary {
    pub id: BattleId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterView {
    pub id: CharacterId,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    /// `Some` when actors were resolved for a battle, possibly empty.
    /// `None` when the context does not expand actors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actors: Option<Vec<ActorView>>,
}

impl CharacterView {
    /// Returns the resolved actors, or an empty slice when not expanded.
    pub fn actor_list(&self) -> &[ActorView] {
        self.actors.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorView {
    pub id: ActorId,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    /// Only populated under [`ActorProjection::FullProfile`](crate::ActorProjection).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media: Option<Vec<SocialMediaLink>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialMediaLink {
    pub platform: String,
    pub url: String,
}
