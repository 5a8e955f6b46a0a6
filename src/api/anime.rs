use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::session_user_id;
use super::{AnimeDetailDto, ApiError, ApiResponse, AppState, WatchButtonDto};
use crate::api::validation::{validate_search_query, validate_slug};
use crate::models::anime::CardPage;
use crate::services::watch_service::resume_episode;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default = "default_page")]
    pub page: u32,
}

const fn default_page() -> u32 {
    1
}

/// GET /search?q=...&page=N
pub async fn search_anime(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<ApiResponse<CardPage>>, ApiError> {
    let query = validate_search_query(&params.q)?;
    let page = params.page.max(1);

    let results = state.catalog().search(query, page).await?;

    Ok(Json(ApiResponse::success(results)))
}

/// GET /anime/{slug}
/// The merged detail view, with the watch button resolved for the current
/// session: history row → "continue", otherwise → "start at episode 1".
pub async fn get_anime(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<AnimeDetailDto>>, ApiError> {
    let slug = validate_slug(&slug)?;

    let detail = state.catalog().anime_detail(slug).await?;

    let (watch, is_favorite) = if let Some(user_id) = session_user_id(&session).await {
        let history = state
            .store()
            .get_history(user_id, slug)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        let is_favorite = state.watch().is_favorite(user_id, slug).await?;
        (
            WatchButtonDto::new(resume_episode(history.as_ref()), history.is_some()),
            Some(is_favorite),
        )
    } else {
        (WatchButtonDto::new(1, false), None)
    };

    Ok(Json(ApiResponse::success(AnimeDetailDto {
        detail,
        watch,
        is_favorite,
    })))
}
