//! Character endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use catalog::{BattleSummary, CharacterPage, CharacterView};
use catalog_store::{CatalogStore, CharacterId};

use super::{AppState, parse_id};
use crate::error::ApiError;

/// GET /characters — every character, without actors.
#[tracing::instrument(skip(state))]
pub async fn list<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<CharacterView>>, ApiError> {
    Ok(Json(state.catalog.list_characters().await?))
}

/// GET /characters/:id — the character and the battles it appears in.
#[tracing::instrument(skip(state))]
pub async fn get<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<CharacterPage>, ApiError> {
    let character_id: CharacterId = parse_id(&id)?;
    Ok(Json(state.catalog.get_character_page(character_id).await?))
}

/// GET /characters/:id/battles — summaries of the character's battles.
#[tracing::instrument(skip(state))]
pub async fn battles<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<BattleSummary>>, ApiError> {
    let character_id: CharacterId = parse_id(&id)?;
    Ok(Json(
        state
            .catalog
            .list_battles_for_character(character_id)
            .await?,
    ))
}
