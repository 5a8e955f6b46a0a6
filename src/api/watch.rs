use axum::{
    Json,
    extract::{Path, State},
    response::Redirect,
};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::session_user_id;
use super::{ApiError, ApiResponse, AppState};
use crate::api::validation::{validate_episode_number, validate_slug};
use crate::services::EpisodeWatch;

/// GET /anime/{slug}/episodes/{number}
/// Streaming sources for one episode. Signed-in playback also advances the
/// user's history row for this slug.
pub async fn watch_episode(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path((slug, number)): Path<(String, i32)>,
) -> Result<Json<ApiResponse<EpisodeWatch>>, ApiError> {
    let slug = validate_slug(&slug)?;
    let number = validate_episode_number(number)?;

    let user_id = session_user_id(&session).await;

    let watch = state.watch().episode_watch(slug, number, user_id).await?;

    Ok(Json(ApiResponse::success(watch)))
}

/// GET /anime/{slug}/watch (page route, not under /api)
/// Resume-playback redirect: signed-in users land on their last watched
/// episode, everyone else on episode 1.
pub async fn resume_redirect(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<Redirect, ApiError> {
    let slug = validate_slug(&slug)?;

    let user_id = session_user_id(&session).await;
    let episode = state.watch().resolve_resume(slug, user_id).await?;

    Ok(Redirect::to(&format!("/anime/{slug}/{episode}")))
}
