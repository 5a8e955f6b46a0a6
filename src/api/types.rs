use serde::{Deserialize, Serialize};

use crate::models::anime::AnimeDetail;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub avatar_url: Option<String>,
}

/// The watch button of a detail page: which episode a click should open.
#[derive(Debug, Serialize)]
pub struct WatchButtonDto {
    pub episode: i32,
    /// "continue" when a history row drove the number, "start" otherwise.
    pub action: &'static str,
}

impl WatchButtonDto {
    #[must_use]
    pub const fn new(episode: i32, resumed: bool) -> Self {
        Self {
            episode,
            action: if resumed { "continue" } else { "start" },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnimeDetailDto {
    #[serde(flatten)]
    pub detail: AnimeDetail,
    pub watch: WatchButtonDto,
    /// Only present for signed-in users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct HistoryDto {
    pub slug: String,
    pub title: String,
    pub image: Option<String>,
    pub episode_number: i32,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct FavoriteDto {
    pub slug: String,
    pub title: String,
    pub image: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub slug: String,
    pub episode_number: i32,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub slug: String,
    pub episode_number: i32,
}

#[derive(Debug, Serialize)]
pub struct FavoriteToggleResponse {
    pub slug: String,
    pub is_favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub version: String,
    pub uptime: u64,
    pub database: &'static str,
}
