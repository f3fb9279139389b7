//! Actor endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use catalog::{ActorView, CharacterView};
use catalog_store::{ActorId, CatalogStore};

use super::{AppState, parse_id};
use crate::error::ApiError;

/// GET /actors/:id — the actor's full profile, social media included.
#[tracing::instrument(skip(state))]
pub async fn get<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<ActorView>, ApiError> {
    let actor_id: ActorId = parse_id(&id)?;
    Ok(Json(state.catalog.get_actor(actor_id).await?))
}

/// GET /actors/:id/characters — characters the actor portrayed.
#[tracing::instrument(skip(state))]
pub async fn characters<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CharacterView>>, ApiError> {
    let actor_id: ActorId = parse_id(&id)?;
    Ok(Json(state.catalog.list_characters_for_actor(actor_id).await?))
}
