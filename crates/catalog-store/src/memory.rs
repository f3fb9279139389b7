use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    ActorId, ActorRow, BattleId, BattleRow, CharacterId, CharacterRow, Result, SocialMediaRow,
    StorageError, store::CatalogStore,
};

#[derive(Default)]
struct Tables {
    battles: BTreeMap<BattleId, BattleRow>,
    characters: BTreeMap<CharacterId, CharacterRow>,
    actors: BTreeMap<ActorId, ActorRow>,
    social_media: Vec<SocialMediaRow>,
    /// (battle, character) pairs.
    appearances: BTreeSet<(BattleId, CharacterId)>,
    /// (actor, character, battle) triples.
    portrayals: BTreeSet<(ActorId, CharacterId, BattleId)>,
}

impl Tables {
    fn require_actor(&self, id: ActorId) -> Result<()> {
        if !self.actors.contains_key(&id) {
            return Err(StorageError::ForeignKey(format!("actor {id} does not exist")));
        }
        Ok(())
    }

    fn require_appearance_rows(
        &self,
        battle_id: BattleId,
        character_id: CharacterId,
    ) -> Result<()> {
        if !self.battles.contains_key(&battle_id) {
            return Err(StorageError::ForeignKey(format!(
                "battle {battle_id} does not exist"
            )));
        }
        if !self.characters.contains_key(&character_id) {
            return Err(StorageError::ForeignKey(format!(
                "character {character_id} does not exist"
            )));
        }
        Ok(())
    }
}

/// In-memory catalog store implementation for testing.
///
/// Provides the same read interface as the PostgreSQL implementation. The
/// `insert_*` and `add_*` loaders exist only to populate fixtures; they are
/// not part of [`CatalogStore`]. Ordered maps keep every listing sorted by id.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCatalogStore {
    /// Creates a new empty in-memory catalog store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a battle.
    pub async fn insert_battle(&self, battle: BattleRow) {
        self.tables.write().await.battles.insert(battle.id, battle);
    }

    /// Inserts or replaces a character.
    pub async fn insert_character(&self, character: CharacterRow) {
        self.tables
            .write()
            .await
            .characters
            .insert(character.id, character);
    }

    /// Inserts or replaces an actor.
    pub async fn insert_actor(&self, actor: ActorRow) {
        self.tables.write().await.actors.insert(actor.id, actor);
    }

    /// Attaches a social-media link to a loaded actor.
    pub async fn add_social_media(&self, link: SocialMediaRow) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.require_actor(link.actor_id)?;
        tables.social_media.push(link);
        Ok(())
    }

    /// Records that a character appears in a battle. Both rows must be loaded.
    pub async fn add_appearance(
        &self,
        battle_id: BattleId,
        character_id: CharacterId,
    ) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.require_appearance_rows(battle_id, character_id)?;
        tables.appearances.insert((battle_id, character_id));
        Ok(())
    }

    /// Records that an actor portrayed a character within a battle.
    ///
    /// All three rows must be loaded. The matching appearance is recorded
    /// too, as the foreign key on the `portrayals` table demands in PostgreSQL.
    pub async fn add_portrayal(
        &self,
        actor_id: ActorId,
        character_id: CharacterId,
        battle_id: BattleId,
    ) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.require_actor(actor_id)?;
        tables.require_appearance_rows(battle_id, character_id)?;
        tables.appearances.insert((battle_id, character_id));
        tables
            .portrayals
            .insert((actor_id, character_id, battle_id));
        Ok(())
    }

    /// Returns the number of portrayals stored.
    pub async fn portrayal_count(&self) -> usize {
        self.tables.read().await.portrayals.len()
    }

    /// Clears all tables.
    pub async fn clear(&self) {
        *self.tables.write().await = Tables::default();
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn all_battles(&self) -> Result<Vec<BattleRow>> {
        Ok(self.tables.read().await.battles.values().cloned().collect())
    }

    async fn all_characters(&self) -> Result<Vec<CharacterRow>> {
        Ok(self
            .tables
            .read()
            .await
            .characters
            .values()
            .cloned()
            .collect())
    }

    async fn all_actors(&self) -> Result<Vec<ActorRow>> {
        Ok(self.tables.read().await.actors.values().cloned().collect())
    }

    async fn battle_by_id(&self, id: BattleId) -> Result<Option<BattleRow>> {
        Ok(self.tables.read().await.battles.get(&id).cloned())
    }

    async fn character_by_id(&self, id: CharacterId) -> Result<Option<CharacterRow>> {
        Ok(self.tables.read().await.characters.get(&id).cloned())
    }

    async fn actor_by_id(&self, id: ActorId) -> Result<Option<ActorRow>> {
        Ok(self.tables.read().await.actors.get(&id).cloned())
    }

    async fn characters_of_battle(&self, battle_id: BattleId) -> Result<Vec<CharacterRow>> {
        let tables = self.tables.read().await;
        let characters = tables
            .appearances
            .iter()
            .filter(|(battle, _)| *battle == battle_id)
            .filter_map(|(_, character)| tables.characters.get(character).cloned())
            .collect();
        Ok(characters)
    }

    async fn battles_of_character(&self, character_id: CharacterId) -> Result<Vec<BattleRow>> {
        let tables = self.tables.read().await;
        let ids: BTreeSet<BattleId> = tables
            .appearances
            .iter()
            .filter(|(_, character)| *character == character_id)
            .map(|(battle, _)| *battle)
            .collect();
        Ok(ids
            .iter()
            .filter_map(|id| tables.battles.get(id).cloned())
            .collect())
    }

    async fn actors_portraying_character_in_battle(
        &self,
        character_id: CharacterId,
        battle_id: BattleId,
    ) -> Result<Vec<ActorRow>> {
        let tables = self.tables.read().await;
        let actors = tables
            .portrayals
            .iter()
            .filter(|(_, character, battle)| *character == character_id && *battle == battle_id)
            .filter_map(|(actor, _, _)| tables.actors.get(actor).cloned())
            .collect();
        Ok(actors)
    }

    async fn characters_of_actor(&self, actor_id: ActorId) -> Result<Vec<CharacterRow>> {
        let tables = self.tables.read().await;
        let ids: BTreeSet<CharacterId> = tables
            .portrayals
            .iter()
            .filter(|(actor, _, _)| *actor == actor_id)
            .map(|(_, character, _)| *character)
            .collect();
        Ok(ids
            .iter()
            .filter_map(|id| tables.characters.get(id).cloned())
            .collect())
    }

    async fn social_media_of_actor(&self, actor_id: ActorId) -> Result<Vec<SocialMediaRow>> {
        let tables = self.tables.read().await;
        Ok(tables
            .social_media
            .iter()
            .filter(|link| link.actor_id == actor_id)
            .cloned()
            .collect())
    }
}
