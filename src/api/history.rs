use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::require_user_id;
use super::{
    ApiError, ApiResponse, AppState, FavoriteDto, FavoriteToggleResponse, HistoryDto,
    ProgressRequest, ProgressResponse,
};
use crate::api::validation::{validate_episode_number, validate_slug};

/// GET /history
/// The signed-in user's "continue watching" rail, newest first.
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<HistoryDto>>>, ApiError> {
    let user_id = require_user_id(&session).await?;

    let entries = state.watch().continue_watching(user_id).await?;

    let dtos = entries
        .into_iter()
        .map(|e| HistoryDto {
            slug: e.slug,
            title: e.title,
            image: e.image,
            episode_number: e.episode_number,
            updated_at: e.updated_at,
        })
        .collect();

    Ok(Json(ApiResponse::success(dtos)))
}

/// PUT /history
/// Explicit progress write from the player.
pub async fn record_progress(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<ProgressRequest>,
) -> Result<Json<ApiResponse<ProgressResponse>>, ApiError> {
    let user_id = require_user_id(&session).await?;
    let slug = validate_slug(&payload.slug)?;
    let episode_number = validate_episode_number(payload.episode_number)?;

    let stored = state
        .watch()
        .record_progress(user_id, slug, episode_number)
        .await?;

    Ok(Json(ApiResponse::success(ProgressResponse {
        slug: slug.to_string(),
        episode_number: stored,
    })))
}

/// DELETE /history/{slug}
pub async fn delete_history(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let user_id = require_user_id(&session).await?;
    let slug = validate_slug(&slug)?;

    let deleted = state.watch().remove_history(user_id, slug).await?;

    Ok(Json(ApiResponse::success(deleted)))
}

/// GET /favorites
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<FavoriteDto>>>, ApiError> {
    let user_id = require_user_id(&session).await?;

    let entries = state.watch().list_favorites(user_id).await?;

    let dtos = entries
        .into_iter()
        .map(|e| FavoriteDto {
            slug: e.slug,
            title: e.title,
            image: e.image,
            created_at: e.created_at,
        })
        .collect();

    Ok(Json(ApiResponse::success(dtos)))
}

/// PUT /favorites/{slug}
/// Toggle; responds with the new state.
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<FavoriteToggleResponse>>, ApiError> {
    let user_id = require_user_id(&session).await?;
    let slug = validate_slug(&slug)?;

    let is_favorite = state.watch().toggle_favorite(user_id, slug).await?;

    Ok(Json(ApiResponse::success(FavoriteToggleResponse {
        slug: slug.to_string(),
        is_favorite,
    })))
}
