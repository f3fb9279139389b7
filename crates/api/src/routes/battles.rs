//! Battle endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use catalog::BattleView;
use catalog_store::{BattleId, CatalogStore};

use super::{AppState, parse_id};
use crate::error::ApiError;

/// GET /battles — every battle with its characters and actors.
#[tracing::instrument(skip(state))]
pub async fn list<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<BattleView>>, ApiError> {
    Ok(Json(state.catalog.list_battles().await?))
}

/// GET /battles/:id — one battle with its characters and actors.
#[tracing::instrument(skip(state))]
pub async fn get<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<BattleView>, ApiError> {
    let battle_id: BattleId = parse_id(&id)?;
    Ok(Json(state.catalog.get_battle(battle_id).await?))
}
