use async_trait::async_trait;
use sqlx::{
    PgPool, Row,
    postgres::{PgPoolOptions, PgRow},
};

use crate::{
    ActorId, ActorRow, BattleId, BattleRow, CharacterId, CharacterRow, Result, SocialMediaRow,
    store::CatalogStore,
};

const BATTLE_COLUMNS: &str = "b.id, b.name, b.duration_seconds, b.publication_date, b.lyrics, \
     b.youtube_link, b.spotify_link, b.cover_image_url";
const CHARACTER_COLUMNS: &str = "c.id, c.name, c.description, c.image_url";
const ACTOR_COLUMNS: &str = "a.id, a.name, a.alias, a.description, a.image_url";

/// PostgreSQL-backed catalog store implementation.
#[derive(Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    /// Creates a new PostgreSQL catalog store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a pool to `database_url` and wraps it in a store.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_battle(row: PgRow) -> Result<BattleRow> {
        Ok(BattleRow {
            id: BattleId::from(row.try_get::<i64, _>("id")?),
            name: row.try_get("name")?,
            duration_seconds: row.try_get("duration_seconds")?,
            publication_date: row.try_get("publication_date")?,
            lyrics: row.try_get("lyrics")?,
            youtube_link: row.try_get("youtube_link")?,
            spotify_link: row.try_get("spotify_link")?,
            cover_image_url: row.try_get("cover_image_url")?,
        })
    }

    fn row_to_character(row: PgRow) -> Result<CharacterRow> {
        Ok(CharacterRow {
            id: CharacterId::from(row.try_get::<i64, _>("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
        })
    }

    fn row_to_actor(row: PgRow) -> Result<ActorRow> {
        Ok(ActorRow {
            id: ActorId::from(row.try_get::<i64, _>("id")?),
            name: row.try_get("name")?,
            alias: row.try_get("alias")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
        })
    }

    fn row_to_social_media(row: PgRow) -> Result<SocialMediaRow> {
        Ok(SocialMediaRow {
            actor_id: ActorId::from(row.try_get::<i64, _>("actor_id")?),
            platform: row.try_get("platform")?,
            url: row.try_get("url")?,
        })
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    #[tracing::instrument(skip(self))]
    async fn all_battles(&self) -> Result<Vec<BattleRow>> {
        let rows = sqlx::query(&format!(
            "SELECT {BATTLE_COLUMNS} FROM battles b ORDER BY b.id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_battle).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn all_characters(&self) -> Result<Vec<CharacterRow>> {
        let rows = sqlx::query(&format!(
            "SELECT {CHARACTER_COLUMNS} FROM characters c ORDER BY c.id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_character).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn all_actors(&self) -> Result<Vec<ActorRow>> {
        let rows = sqlx::query(&format!(
            "SELECT {ACTOR_COLUMNS} FROM actors a ORDER BY a.id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_actor).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn battle_by_id(&self, id: BattleId) -> Result<Option<BattleRow>> {
        let row: Option<PgRow> = sqlx::query(&format!(
            "SELECT {BATTLE_COLUMNS} FROM battles b WHERE b.id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_battle).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn character_by_id(&self, id: CharacterId) -> Result<Option<CharacterRow>> {
        let row: Option<PgRow> = sqlx::query(&format!(
            "SELECT {CHARACTER_COLUMNS} FROM characters c WHERE c.id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_character).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn actor_by_id(&self, id: ActorId) -> Result<Option<ActorRow>> {
        let row: Option<PgRow> = sqlx::query(&format!(
            "SELECT {ACTOR_COLUMNS} FROM actors a WHERE a.id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_actor).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn characters_of_battle(&self, battle_id: BattleId) -> Result<Vec<CharacterRow>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {CHARACTER_COLUMNS}
            FROM characters c
            JOIN battles_characters bc ON bc.character_id = c.id
            WHERE bc.battle_id = $1
            ORDER BY c.id ASC
            "#
        ))
        .bind(battle_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_character).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn battles_of_character(&self, character_id: CharacterId) -> Result<Vec<BattleRow>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {BATTLE_COLUMNS}
            FROM battles b
            JOIN battles_characters bc ON bc.battle_id = b.id
            WHERE bc.character_id = $1
            ORDER BY b.id ASC
            "#
        ))
        .bind(character_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_battle).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn actors_portraying_character_in_battle(
        &self,
        character_id: CharacterId,
        battle_id: BattleId,
    ) -> Result<Vec<ActorRow>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {ACTOR_COLUMNS}
            FROM actors a
            JOIN portrayals p ON p.actor_id = a.id
            WHERE p.character_id = $1 AND p.battle_id = $2
            ORDER BY a.id ASC
            "#
        ))
        .bind(character_id.as_i64())
        .bind(battle_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_actor).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn characters_of_actor(&self, actor_id: ActorId) -> Result<Vec<CharacterRow>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {CHARACTER_COLUMNS}
            FROM characters c
            WHERE EXISTS (
                SELECT 1 FROM portrayals p
                WHERE p.character_id = c.id AND p.actor_id = $1
            )
            ORDER BY c.id ASC
            "#
        ))
        .bind(actor_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_character).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn social_media_of_actor(&self, actor_id: ActorId) -> Result<Vec<SocialMediaRow>> {
        let rows = sqlx::query(
            r#"
            SELECT actor_id, platform, url
            FROM social_media
            WHERE actor_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(actor_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_social_media).collect()
    }
}
