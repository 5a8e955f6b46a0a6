use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::services::HomePage;

/// GET /home
/// Landing-page view model: recent releases plus currently-airing titles.
pub async fn get_home(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HomePage>>, ApiError> {
    let page = state.catalog().home().await?;
    Ok(Json(ApiResponse::success(page)))
}
