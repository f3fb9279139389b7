//! Catalog service providing the read use cases.

use catalog_store::{ActorId, BattleId, CatalogStore, CatalogStoreExt, CharacterId};
use futures_util::{StreamExt, TryStreamExt, stream};
use serde::Serialize;
use views::{
    ActorProjection, ActorView, BattleSummary, BattleView, CharacterView, ViewAssembler,
};

use crate::error::{CatalogError, Result};

/// Battles assembled at once by [`CatalogService::list_battles`]. Each one
/// keeps up to [`views::MAX_CONCURRENT_FETCHES`] lookups of its own in flight.
const BATTLES_IN_FLIGHT: usize = 2;

/// A character together with the battles it appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterPage {
    pub character: CharacterView,
    pub battles: Vec<BattleSummary>,
}

/// Service answering catalog queries.
///
/// Owns its store handle; nothing is looked up globally. Failures are
/// returned as [`CatalogError`] and never replaced by empty results.
#[derive(Clone)]
pub struct CatalogService<S: CatalogStore + Clone> {
    store: S,
    assembler: ViewAssembler<S>,
}

impl<S: CatalogStore + Clone> CatalogService<S> {
    /// Creates a new catalog service with the given store.
    pub fn new(store: S) -> Self {
        Self::with_projection(store, ActorProjection::default())
    }

    /// Creates a service whose battle views project actors with `projection`.
    pub fn with_projection(store: S, projection: ActorProjection) -> Self {
        Self {
            assembler: ViewAssembler::with_projection(store.clone(), projection),
            store,
        }
    }

    /// Lists every battle as a fully assembled view, ordered by id.
    ///
    /// The first battle that fails to assemble fails the whole listing.
    #[tracing::instrument(skip(self))]
    pub async fn list_battles(&self) -> Result<Vec<BattleView>> {
        let battles = self.store.all_battles().await?;

        let views: Vec<BattleView> = stream::iter(battles)
            .map(|battle| async move { self.assembler.assemble_battle_view(&battle).await })
            .buffered(BATTLES_IN_FLIGHT)
            .try_collect()
            .await?;

        metrics::counter!("catalog_queries_total", "query" => "list_battles").increment(1);
        Ok(views)
    }

    /// Loads a battle by id.
    ///
    /// Returns [`CatalogError::NotFound`] if the battle doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_battle(&self, id: BattleId) -> Result<BattleView> {
        let battle = self
            .store
            .battle_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("battle", id))?;

        let view = self.assembler.assemble_battle_view(&battle).await?;

        metrics::counter!("catalog_queries_total", "query" => "get_battle").increment(1);
        Ok(view)
    }

    /// Lists summaries of the battles a character appears in.
    ///
    /// An unknown character is [`CatalogError::NotFound`], so callers can tell
    /// it apart from a character without battles.
    #[tracing::instrument(skip(self))]
    pub async fn list_battles_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<BattleSummary>> {
        if !self.store.character_exists(character_id).await? {
            return Err(CatalogError::not_found("character", character_id));
        }

        let battles = self.store.battles_of_character(character_id).await?;

        metrics::counter!("catalog_queries_total", "query" => "list_battles_for_character")
            .increment(1);
        Ok(battles
            .iter()
            .map(|battle| self.assembler.assemble_battle_summary(battle))
            .collect())
    }

    /// Lists the characters an actor portrayed, without expanding actors.
    ///
    /// An unknown actor is [`CatalogError::NotFound`].
    #[tracing::instrument(skip(self))]
    pub async fn list_characters_for_actor(
        &self,
        actor_id: ActorId,
    ) -> Result<Vec<CharacterView>> {
        if !self.store.actor_exists(actor_id).await? {
            return Err(CatalogError::not_found("actor", actor_id));
        }

        let characters = self.store.characters_of_actor(actor_id).await?;

        metrics::counter!("catalog_queries_total", "query" => "list_characters_for_actor")
            .increment(1);
        Ok(characters
            .iter()
            .map(|character| self.assembler.assemble_character_view(character))
            .collect())
    }

    /// Lists every character, without expanding actors.
    #[tracing::instrument(skip(self))]
    pub async fn list_characters(&self) -> Result<Vec<CharacterView>> {
        let characters = self.store.all_characters().await?;

        metrics::counter!("catalog_queries_total", "query" => "list_characters").increment(1);
        Ok(characters
            .iter()
            .map(|character| self.assembler.assemble_character_view(character))
            .collect())
    }

    /// Loads a character by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_character(&self, id: CharacterId) -> Result<CharacterView> {
        let character = self
            .store
            .character_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("character", id))?;

        metrics::counter!("catalog_queries_total", "query" => "get_character").increment(1);
        Ok(self.assembler.assemble_character_view(&character))
    }

    /// Loads a character together with summaries of its battles.
    #[tracing::instrument(skip(self))]
    pub async fn get_character_page(&self, id: CharacterId) -> Result<CharacterPage> {
        let character = self.get_character(id).await?;
        let battles = self
            .store
            .battles_of_character(id)
            .await?
            .iter()
            .map(|battle| self.assembler.assemble_battle_summary(battle))
            .collect();

        Ok(CharacterPage { character, battles })
    }

    /// Loads an actor's full profile, social media included.
    #[tracing::instrument(skip(self))]
    pub async fn get_actor(&self, id: ActorId) -> Result<ActorView> {
        let actor = self
            .store
            .actor_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("actor", id))?;

        let view = self
            .assembler
            .assemble_actor_view(&actor, ActorProjection::FullProfile)
            .await?;

        metrics::counter!("catalog_queries_total", "query" => "get_actor").increment(1);
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_store::{ActorRow, BattleRow, CharacterRow, InMemoryCatalogStore, SocialMediaRow};
    use chrono::NaiveDate;

    async fn setup() -> CatalogService<InMemoryCatalogStore> {
        let store = InMemoryCatalogStore::new();
        let date = NaiveDate::from_ymd_opt(2010, 9, 26).unwrap();
        store.insert_battle(BattleRow::new(1, "B1", 154, date)).await;
        store.insert_battle(BattleRow::new(2, "B2", 201, date)).await;
        store.insert_character(CharacterRow::new(10, "Batman")).await;
        store.insert_actor(ActorRow::new(100, "X")).await;
        store.insert_actor(ActorRow::new(101, "Y")).await;
        store
            .add_social_media(SocialMediaRow::new(100, "youtube", "https://youtube.com/x"))
            .await
            .unwrap();
        store
            .add_portrayal(ActorId::from(100), CharacterId::from(10), BattleId::from(1))
            .await
            .unwrap();
        store
            .add_portrayal(ActorId::from(101), CharacterId::from(10), BattleId::from(2))
            .await
            .unwrap();

        CatalogService::new(store)
    }

    #[tokio::test]
    async fn get_battle_resolves_per_battle_actors() {
        let service = setup().await;

        let view = service.get_battle(BattleId::from(1)).await.unwrap();
        assert_eq!(view.characters.len(), 1);
        let actors = view.characters[0].actor_list();
        assert_eq!(actors.len(), 1);
        assert_eq!(actors[0].name, "X");
        assert!(actors[0].social_media.is_none());
    }

    #[tokio::test]
    async fn get_battle_not_found() {
        let service = setup().await;

        let result = service.get_battle(BattleId::from(999)).await;
        assert!(matches!(
            result,
            Err(CatalogError::NotFound {
                entity: "battle",
                id: 999
            })
        ));
    }

    #[tokio::test]
    async fn list_battles_in_id_order() {
        let service = setup().await;

        let battles = service.list_battles().await.unwrap();
        let names: Vec<_> = battles.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["B1", "B2"]);
    }

    #[tokio::test]
    async fn battles_for_character_are_summaries() {
        let service = setup().await;

        let summaries = service
            .list_battles_for_character(CharacterId::from(10))
            .await
            .unwrap();
        assert_eq!(
            summaries,
            vec![
                BattleSummary {
                    id: BattleId::from(1),
                    name: "B1".to_string()
                },
                BattleSummary {
                    id: BattleId::from(2),
                    name: "B2".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn battles_for_unknown_character_not_found() {
        let service = setup().await;

        let err = service
            .list_battles_for_character(CharacterId::from(77))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn characters_for_actor_are_not_expanded() {
        let service = setup().await;

        let characters = service
            .list_characters_for_actor(ActorId::from(101))
            .await
            .unwrap();
        assert_eq!(characters.len(), 1);
        assert_eq!(characters[0].name, "Batman");
        assert!(characters[0].actors.is_none());
    }

    #[tokio::test]
    async fn actor_profile_includes_social_media() {
        let service = setup().await;

        let actor = service.get_actor(ActorId::from(100)).await.unwrap();
        let links = actor.social_media.unwrap();
        assert_eq!(links[0].platform, "youtube");

        let err = service.get_actor(ActorId::from(5)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn character_page_combines_character_and_battles() {
        let service = setup().await;

        let page = service
            .get_character_page(CharacterId::from(10))
            .await
            .unwrap();
        assert_eq!(page.character.name, "Batman");
        assert_eq!(page.battles.len(), 2);

        let err = service
            .get_character_page(CharacterId::from(99))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::NotFound {
                entity: "character",
                ..
            }
        ));
    }
}
