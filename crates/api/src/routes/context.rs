//! Operator endpoints for the context cache.

use axum::extract::{Path, State};
use axum::Json;
use chat_orchestrator::ContextDocument;
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Snapshot key, null when the snapshot could not be stored.
    pub cache_key: Option<String>,
}

/// Rebuild a restaurant's context snapshot.
pub async fn refresh(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
) -> Result<Json<RefreshResponse>> {
    let cache_key = state.orchestrator.refresh_context(restaurant_id).await?;
    Ok(Json(RefreshResponse { cache_key }))
}

/// The context document the chatbot answers from.
pub async fn context(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
) -> Result<Json<ContextDocument>> {
    Ok(Json(state.orchestrator.context(restaurant_id).await?))
}
