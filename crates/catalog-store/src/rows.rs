//! Raw rows as stored in the catalog tables.

use chrono::NaiveDate;

use crate::{ActorId, BattleId, CharacterId};

/// A row of the `battles` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleRow {
    pub id: BattleId,
    pub name: String,
    pub duration_seconds: i32,
    pub publication_date: NaiveDate,
    pub lyrics: Option<String>,
    pub youtube_link: Option<String>,
    pub spotify_link: Option<String>,
    pub cover_image_url: Option<String>,
}

impl BattleRow {
    /// Creates a battle row with only the required columns set.
    pub fn new(
        id: impl Into<BattleId>,
        name: impl Into<String>,
        duration_seconds: i32,
        publication_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration_seconds,
            publication_date,
            lyrics: None,
            youtube_link: None,
            spotify_link: None,
            cover_image_url: None,
        }
    }
}

/// A row of the `characters` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRow {
    pub id: CharacterId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl CharacterRow {
    pub fn new(id: impl Into<CharacterId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            image_url: None,
        }
    }
}

/// A row of the `actors` table.
///
/// Social-media references live in their own table, see [`SocialMediaRow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorRow {
    pub id: ActorId,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl ActorRow {
    pub fn new(id: impl Into<ActorId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            alias: None,
            description: None,
            image_url: None,
        }
    }
}

/// A row of the `social_media` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialMediaRow {
    pub actor_id: ActorId,
    pub platform: String,
    pub url: String,
}

impl SocialMediaRow {
    pub fn new(
        actor_id: impl Into<ActorId>,
        platform: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            platform: platform.into(),
            url: url.into(),
        }
    }
}
