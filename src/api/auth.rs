use axum::{
    Json,
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, UserDto};
use crate::constants::session::{OAUTH_STATE_KEY, USER_ID_KEY};
use crate::services::auth_service::{generate_state, states_match};

#[derive(Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    #[serde(default)]
    pub state: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Gate for history/favorites routes: a session user must exist.
pub async fn auth_middleware(
    session: Session,
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    if let Ok(Some(user_id)) = session.get::<i32>(USER_ID_KEY).await {
        tracing::Span::current().record("user_id", user_id);
        return Ok(next.run(request).await);
    }

    let response = (StatusCode::UNAUTHORIZED, "Unauthorized");
    Ok(response.into_response())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /auth/login
/// Kick off the OAuth round trip: park a CSRF state in the session and
/// redirect to the provider's authorize page.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Redirect, ApiError> {
    let csrf_state = generate_state();

    session
        .insert(OAUTH_STATE_KEY, csrf_state.clone())
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?;

    let url = state.auth().authorize_url(&csrf_state).await?;

    Ok(Redirect::to(&url))
}

/// GET /auth/callback
/// Provider redirect target: verify state, exchange the code, start a session.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect, ApiError> {
    let expected: Option<String> = session
        .remove(OAUTH_STATE_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?;

    if !states_match(expected.as_deref(), &query.state) {
        return Err(crate::services::AuthError::StateMismatch.into());
    }

    let user = state.auth().complete_login(&query.code).await?;

    session
        .insert(USER_ID_KEY, user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    Ok(Redirect::to("/"))
}

/// POST /auth/logout
/// Invalidate the current session
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    (StatusCode::OK, "Logged out")
}

/// GET /auth/me
/// Get current user information (requires authentication)
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user_id = require_user_id(&session).await?;

    let user = state
        .auth()
        .current_user(user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

    Ok(Json(ApiResponse::success(UserDto {
        id: user.id,
        username: user.username,
        avatar_url: user.avatar_url,
    })))
}

// ============================================================================
// Helpers
// ============================================================================

/// User id from the session cookie, if anyone is signed in.
pub async fn session_user_id(session: &Session) -> Option<i32> {
    session.get::<i32>(USER_ID_KEY).await.ok().flatten()
}

/// User id from the session, error if not authenticated.
pub async fn require_user_id(session: &Session) -> Result<i32, ApiError> {
    session
        .get::<i32>(USER_ID_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}
