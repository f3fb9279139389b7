use async_trait::async_trait;

use crate::{
    ActorId, ActorRow, BattleId, BattleRow, CharacterId, CharacterRow, Result, SocialMediaRow,
};

/// Core trait for catalog store implementations.
///
/// The store is read-only. Lookups by id return `None` when no row exists,
/// and relation queries return an empty list; only backend faults are errors.
/// Every list is ordered by identifier ascending.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Retrieves every battle.
    async fn all_battles(&self) -> Result<Vec<BattleRow>>;

    /// Retrieves every character.
    async fn all_characters(&self) -> Result<Vec<CharacterRow>>;

    /// Retrieves every actor.
    async fn all_actors(&self) -> Result<Vec<ActorRow>>;

    async fn battle_by_id(&self, id: BattleId) -> Result<Option<BattleRow>>;

    async fn character_by_id(&self, id: CharacterId) -> Result<Option<CharacterRow>>;

    async fn actor_by_id(&self, id: ActorId) -> Result<Option<ActorRow>>;

    /// Retrieves the characters appearing in a battle.
    async fn characters_of_battle(&self, battle_id: BattleId) -> Result<Vec<CharacterRow>>;

    /// Retrieves the battles a character appears in.
    async fn battles_of_character(&self, character_id: CharacterId) -> Result<Vec<BattleRow>>;

    /// Retrieves the actors who portrayed `character_id` within `battle_id`.
    ///
    /// Only portrayals referencing both the character and the battle match.
    /// An actor who played the character in another battle is excluded.
    async fn actors_portraying_character_in_battle(
        &self,
        character_id: CharacterId,
        battle_id: BattleId,
    ) -> Result<Vec<ActorRow>>;

    /// Retrieves the distinct characters an actor portrayed in any battle.
    async fn characters_of_actor(&self, actor_id: ActorId) -> Result<Vec<CharacterRow>>;

    /// Retrieves an actor's social-media references.
    async fn social_media_of_actor(&self, actor_id: ActorId) -> Result<Vec<SocialMediaRow>>;
}

/// Extension trait providing convenience methods for catalog stores.
#[async_trait]
pub trait CatalogStoreExt: CatalogStore {
    async fn battle_exists(&self, id: BattleId) -> Result<bool> {
        Ok(self.battle_by_id(id).await?.is_some())
    }

    async fn character_exists(&self, id: CharacterId) -> Result<bool> {
        Ok(self.character_by_id(id).await?.is_some())
    }

    async fn actor_exists(&self, id: ActorId) -> Result<bool> {
        Ok(self.actor_by_id(id).await?.is_some())
    }
}

// Blanket implementation for all CatalogStore implementations
impl<T: CatalogStore + ?Sized> CatalogStoreExt for T {}

