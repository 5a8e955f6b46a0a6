//! Domain service for playback: resume resolution, streaming sources,
//! history and favorites.

use crate::clients::consumet::VideoSource;
use crate::db::{FavoriteEntry, HistoryEntry};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Anime not found: {0}")]
    AnimeNotFound(String),

    #[error("Episode {number} not found for {slug}")]
    EpisodeNotFound { slug: String, number: i32 },

    #[error("Database error: {0}")]
    Database(String),

    #[error("External API error: {service} - {message}")]
    ExternalApi { service: String, message: String },
}

impl WatchError {
    pub fn content_error(msg: impl Into<String>) -> Self {
        Self::ExternalApi {
            service: "Consumet".to_string(),
            message: msg.into(),
        }
    }
}

/// Everything the player page needs for one episode.
#[derive(Debug, serde::Serialize)]
pub struct EpisodeWatch {
    pub slug: String,
    pub title: String,
    pub episode_number: i32,
    pub total_episodes: Option<i32>,
    pub previous_episode: Option<i32>,
    pub next_episode: Option<i32>,
    pub sources: Vec<VideoSource>,
    pub referer: Option<String>,
    pub download: Option<String>,
}

#[async_trait::async_trait]
pub trait WatchService: Send + Sync {
    /// Resume-playback resolution: the episode the watch button should link
    /// to for this slug and (optional) user.
    async fn resolve_resume(&self, slug: &str, user_id: Option<i32>) -> Result<i32, WatchError>;

    /// Streaming sources for one episode. For a signed-in user this also
    /// records playback in the history table.
    async fn episode_watch(
        &self,
        slug: &str,
        number: i32,
        user_id: Option<i32>,
    ) -> Result<EpisodeWatch, WatchError>;

    async fn continue_watching(&self, user_id: i32) -> Result<Vec<HistoryEntry>, WatchError>;

    /// Explicit progress write, used when the player advances without a page
    /// load. Returns the stored episode number.
    async fn record_progress(
        &self,
        user_id: i32,
        slug: &str,
        episode_number: i32,
    ) -> Result<i32, WatchError>;

    async fn remove_history(&self, user_id: i32, slug: &str) -> Result<bool, WatchError>;

    /// Flips the favorite state for (user, slug); returns the new state.
    async fn toggle_favorite(&self, user_id: i32, slug: &str) -> Result<bool, WatchError>;

    async fn list_favorites(&self, user_id: i32) -> Result<Vec<FavoriteEntry>, WatchError>;

    async fn is_favorite(&self, user_id: i32, slug: &str) -> Result<bool, WatchError>;
}

/// Resume-playback resolution on an already-fetched history row.
///
/// No row, or a nonsensical stored number, resolves to episode 1.
#[must_use]
pub fn resume_episode(history: Option<&HistoryEntry>) -> i32 {
    match history {
        Some(entry) if entry.episode_number >= 1 => entry.episode_number,
        _ => 1,
    }
}

/// Previous/next episode numbers for the player controls, clamped to the
/// known episode range.
#[must_use]
pub fn neighbor_episodes(number: i32, total: Option<i32>) -> (Option<i32>, Option<i32>) {
    let previous = (number > 1).then(|| number - 1);
    let next = match total {
        Some(total) if number >= total => None,
        _ => Some(number + 1),
    };
    (previous, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(episode_number: i32) -> HistoryEntry {
        HistoryEntry {
            slug: "one-piece".to_string(),
            title: "One Piece".to_string(),
            image: None,
            episode_number,
            updated_at: "2026-03-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn resume_defaults_to_first_episode() {
        assert_eq!(resume_episode(None), 1);
    }

    #[test]
    fn resume_uses_stored_episode() {
        assert_eq!(resume_episode(Some(&history(42))), 42);
    }

    #[test]
    fn resume_rejects_nonsense_rows() {
        assert_eq!(resume_episode(Some(&history(0))), 1);
        assert_eq!(resume_episode(Some(&history(-3))), 1);
    }

    #[test]
    fn neighbors_in_the_middle() {
        assert_eq!(neighbor_episodes(5, Some(12)), (Some(4), Some(6)));
    }

    #[test]
    fn neighbors_at_the_edges() {
        assert_eq!(neighbor_episodes(1, Some(12)), (None, Some(2)));
        assert_eq!(neighbor_episodes(12, Some(12)), (Some(11), None));
    }

    #[test]
    fn neighbors_with_unknown_total() {
        // Airing shows have no final count; next stays available.
        assert_eq!(neighbor_episodes(7, None), (Some(6), Some(8)));
    }

    #[test]
    fn watch_error_display() {
        let err = WatchError::EpisodeNotFound {
            slug: "one-piece".to_string(),
            number: 9999,
        };
        assert_eq!(err.to_string(), "Episode 9999 not found for one-piece");
    }
}
