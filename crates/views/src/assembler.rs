//! Builds nested views from catalog rows.
//!
//! [`ViewAssembler`] fetches the rows a view needs from a [`CatalogStore`];
//! the free functions in this module turn already-fetched rows into views and
//! never touch the store.

use std::collections::HashSet;

use catalog_store::{ActorRow, BattleId, BattleRow, CatalogStore, CharacterRow, SocialMediaRow};
use futures_util::{StreamExt, TryStreamExt, stream};

use crate::error::{AssemblyError, Result};
use crate::projection::ActorProjection;
use crate::view::{ActorView, BattleSummary, BattleView, CharacterView, SocialMediaLink};

/// Upper bound on store lookups a single assembly keeps in flight.
pub const MAX_CONCURRENT_FETCHES: usize = 4;

/// Assembles battle, character and actor views from a catalog store.
///
/// Actors are always resolved through the portrayal relation of the battle
/// being assembled, never from everything a character was ever played by.
/// Any fetch failure aborts the view being built.
#[derive(Clone)]
pub struct ViewAssembler<S: CatalogStore> {
    store: S,
    projection: ActorProjection,
}

impl<S: CatalogStore> ViewAssembler<S> {
    /// Creates an assembler using the battle-context actor projection.
    pub fn new(store: S) -> Self {
        Self::with_projection(store, ActorProjection::default())
    }

    /// Creates an assembler projecting actors inside battles with `projection`.
    pub fn with_projection(store: S, projection: ActorProjection) -> Self {
        Self { store, projection }
    }

    /// Assembles the full battle graph: characters, and for each character
    /// the actors who portrayed it in this battle.
    #[tracing::instrument(
        skip(self, battle),
        fields(battle_id = %battle.id, projection = %self.projection)
    )]
    pub async fn assemble_battle_view(&self, battle: &BattleRow) -> Result<BattleView> {
        let characters = self.store.characters_of_battle(battle.id).await?;

        let cast: Vec<_> = stream::iter(characters)
            .map(|character| async move {
                let actors = self.resolve_actors(&character, battle.id).await?;
                Ok::<_, AssemblyError>((character, actors))
            })
            .buffered(MAX_CONCURRENT_FETCHES)
            .try_collect()
            .await?;

        let view = build_battle_view(battle, cast)?;

        metrics::counter!("catalog_battle_views_assembled").increment(1);
        metrics::histogram!("catalog_battle_view_characters").record(view.characters.len() as f64);
        tracing::debug!(characters = view.characters.len(), "battle view assembled");

        Ok(view)
    }

    /// Projects a battle down to its identity and name. Fetches nothing.
    pub fn assemble_battle_summary(&self, battle: &BattleRow) -> BattleSummary {
        BattleSummary {
            id: battle.id,
            name: battle.name.clone(),
        }
    }

    /// Projects a character without expanding its actors.
    pub fn assemble_character_view(&self, character: &CharacterRow) -> CharacterView {
        project_character(character, None)
    }

    /// Projects an actor, fetching social media only when `projection` asks for it.
    pub async fn assemble_actor_view(
        &self,
        actor: &ActorRow,
        projection: ActorProjection,
    ) -> Result<ActorView> {
        let links = if projection.includes_social_media() {
            self.store.social_media_of_actor(actor.id).await?
        } else {
            Vec::new()
        };
        Ok(project_actor(actor, links, projection))
    }

    async fn resolve_actors(
        &self,
        character: &CharacterRow,
        battle_id: BattleId,
    ) -> Result<Vec<ActorView>> {
        let rows = self
            .store
            .actors_portraying_character_in_battle(character.id, battle_id)
            .await?;

        stream::iter(rows)
            .map(|row| async move { self.assemble_actor_view(&row, self.projection).await })
            .buffered(MAX_CONCURRENT_FETCHES)
            .try_collect()
            .await
    }
}

/// Builds a battle view from the battle row and its resolved cast.
///
/// Characters and actors are ordered by id whatever order the rows came in.
/// A character listed twice, or an actor listed twice for one character,
/// fails with [`AssemblyError::Invariant`].
pub fn build_battle_view(
    battle: &BattleRow,
    cast: Vec<(CharacterRow, Vec<ActorView>)>,
) -> Result<BattleView> {
    let mut seen = HashSet::with_capacity(cast.len());
    let mut characters = Vec::with_capacity(cast.len());

    for (character, mut actors) in cast {
        if !seen.insert(character.id) {
            return Err(AssemblyError::Invariant(format!(
                "character {} listed twice for battle {}",
                character.id, battle.id
            )));
        }

        actors.sort_by_key(|a| a.id);
        if let Some(pair) = actors.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(AssemblyError::Invariant(format!(
                "actor {} listed twice for character {} in battle {}",
                pair[0].id, character.id, battle.id
            )));
        }

        characters.push(project_character(&character, Some(actors)));
    }

    characters.sort_by_key(|c| c.id);

    Ok(BattleView {
        id: battle.id,
        name: battle.name.clone(),
        duration_seconds: battle.duration_seconds,
        publication_date: battle.publication_date,
        lyrics: battle.lyrics.clone(),
        youtube_link: battle.youtube_link.clone(),
        spotify_link: battle.spotify_link.clone(),
        image: battle.cover_image_url.clone(),
        characters,
    })
}

pub fn project_character(
    character: &CharacterRow,
    actors: Option<Vec<ActorView>>,
) -> CharacterView {
    CharacterView {
        id: character.id,
        name: character.name.clone(),
        description: character.description.clone(),
        image: character.image_url.clone(),
        actors,
    }
}

/// Projects an actor row. Under [`ActorProjection::BattleContext`] the links
/// are dropped and `social_media` is `None`.
pub fn project_actor(
    actor: &ActorRow,
    links: Vec<SocialMediaRow>,
    projection: ActorProjection,
) -> ActorView {
    let social_media = projection.includes_social_media().then(|| {
        links
            .into_iter()
            .map(|link| SocialMediaLink {
                platform: link.platform,
                url: link.url,
            })
            .collect()
    });

    ActorView {
        id: actor.id,
        name: actor.name.clone(),
        alias: actor.alias.clone(),
        description: actor.description.clone(),
        image: actor.image_url.clone(),
        social_media,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn battle() -> BattleRow {
        let mut row = BattleRow::new(
            1,
            "B1",
            154,
            NaiveDate::from_ymd_opt(2010, 9, 26).unwrap(),
        );
        row.lyrics = Some("Verse one".to_string());
        row.spotify_link = Some("https://open.spotify.com/track/b1".to_string());
        row.cover_image_url = Some("b1.png".to_string());
        row
    }

    fn actor_view(id: i64, name: &str) -> ActorView {
        project_actor(
            &ActorRow::new(id, name),
            Vec::new(),
            ActorProjection::BattleContext,
        )
    }

    #[test]
    fn scalars_are_copied_verbatim() {
        let view = build_battle_view(&battle(), Vec::new()).unwrap();

        assert_eq!(view.name, "B1");
        assert_eq!(view.duration_seconds, 154);
        assert_eq!(view.lyrics.as_deref(), Some("Verse one"));
        assert_eq!(
            view.spotify_link.as_deref(),
            Some("https://open.spotify.com/track/b1")
        );
        assert!(view.youtube_link.is_none());
        assert_eq!(view.image.as_deref(), Some("b1.png"));
        assert!(view.characters.is_empty());
    }

    #[test]
    fn characters_and_actors_sorted_by_id() {
        let cast = vec![
            (
                CharacterRow::new(12, "Joker"),
                vec![actor_view(102, "Z"), actor_view(100, "X")],
            ),
            (CharacterRow::new(10, "Batman"), vec![actor_view(101, "Y")]),
        ];

        let view = build_battle_view(&battle(), cast).unwrap();

        let names: Vec<_> = view.characters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Batman", "Joker"]);
        let joker_actors: Vec<_> = view.characters[1]
            .actor_list()
            .iter()
            .map(|a| a.id.as_i64())
            .collect();
        assert_eq!(joker_actors, vec![100, 102]);
    }

    #[test]
    fn duplicate_character_is_an_invariant_violation() {
        let cast = vec![
            (CharacterRow::new(10, "Batman"), Vec::new()),
            (CharacterRow::new(10, "Batman"), Vec::new()),
        ];

        let result = build_battle_view(&battle(), cast);
        assert!(matches!(result, Err(AssemblyError::Invariant(_))));
    }

    #[test]
    fn duplicate_actor_is_an_invariant_violation() {
        let cast = vec![(
            CharacterRow::new(10, "Batman"),
            vec![actor_view(100, "X"), actor_view(100, "X")],
        )];

        let err = build_battle_view(&battle(), cast).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Assembly invariant violated: actor 100 listed twice for character 10 in battle 1"
        );
    }

    #[test]
    fn battle_context_drops_social_media() {
        let links = vec![SocialMediaRow::new(100, "twitter", "https://twitter.com/x")];

        let view = project_actor(
            &ActorRow::new(100, "X"),
            links,
            ActorProjection::BattleContext,
        );
        assert!(view.social_media.is_none());
    }

    #[test]
    fn full_profile_keeps_social_media() {
        let links = vec![SocialMediaRow::new(100, "twitter", "https://twitter.com/x")];

        let view = project_actor(&ActorRow::new(100, "X"), links, ActorProjection::FullProfile);
        let links = view.social_media.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].platform, "twitter");
    }

    #[test]
    fn full_profile_without_links_is_empty_not_absent() {
        let view = project_actor(
            &ActorRow::new(100, "X"),
            Vec::new(),
            ActorProjection::FullProfile,
        );
        assert_eq!(view.social_media, Some(Vec::new()));
    }

    #[test]
    fn unexpanded_character_serializes_without_actors() {
        let view = project_character(&CharacterRow::new(10, "Batman"), None);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("actors").is_none());

        let view = project_character(&CharacterRow::new(10, "Batman"), Some(Vec::new()));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["actors"], serde_json::json!([]));
    }
}
