//! Concrete `WatchService` backed by the content API and the store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::clients::consumet::{AnimeInfo, ConsumetClient};
use crate::db::{FavoriteEntry, HistoryEntry, Store};
use crate::services::watch_service::{
    EpisodeWatch, WatchError, WatchService, neighbor_episodes, resume_episode,
};

pub struct DefaultWatchService {
    consumet: Arc<ConsumetClient>,
    store: Store,
}

impl DefaultWatchService {
    #[must_use]
    pub const fn new(consumet: Arc<ConsumetClient>, store: Store) -> Self {
        Self { consumet, store }
    }

    async fn fetch_info(&self, slug: &str) -> Result<AnimeInfo, WatchError> {
        self.consumet
            .anime_info(slug)
            .await
            .map_err(|e| WatchError::content_error(e.to_string()))?
            .ok_or_else(|| WatchError::AnimeNotFound(slug.to_string()))
    }

    /// Title/image for a history or favorite row: the cached anime table
    /// first, the content API when the slug was never resolved here.
    async fn card_fields(&self, slug: &str) -> Result<(String, Option<String>), WatchError> {
        if let Some(row) = self
            .store
            .get_anime_by_slug(slug)
            .await
            .map_err(|e| WatchError::Database(e.to_string()))?
        {
            return Ok((row.title, row.image));
        }

        let info = self.fetch_info(slug).await?;
        Ok((info.title, info.image))
    }
}

#[async_trait]
impl WatchService for DefaultWatchService {
    async fn resolve_resume(&self, slug: &str, user_id: Option<i32>) -> Result<i32, WatchError> {
        let Some(user_id) = user_id else {
            return Ok(1);
        };

        let history = self
            .store
            .get_history(user_id, slug)
            .await
            .map_err(|e| WatchError::Database(e.to_string()))?;

        Ok(resume_episode(history.as_ref()))
    }

    async fn episode_watch(
        &self,
        slug: &str,
        number: i32,
        user_id: Option<i32>,
    ) -> Result<EpisodeWatch, WatchError> {
        let info = self.fetch_info(slug).await?;

        let episode = info
            .episodes
            .iter()
            .find(|e| e.number == number)
            .ok_or_else(|| WatchError::EpisodeNotFound {
                slug: slug.to_string(),
                number,
            })?;

        let streaming = self
            .consumet
            .episode_sources(&episode.id)
            .await
            .map_err(|e| WatchError::content_error(e.to_string()))?
            .ok_or_else(|| WatchError::EpisodeNotFound {
                slug: slug.to_string(),
                number,
            })?;

        // Playback is the moment history advances. Losing the write must not
        // lose the stream.
        if let Some(user_id) = user_id
            && number >= 1
            && let Err(e) = self
                .store
                .upsert_history(user_id, slug, &info.title, info.image.as_deref(), number)
                .await
        {
            warn!(slug, number, "Failed to record watch history: {e}");
        }

        let (previous_episode, next_episode) = neighbor_episodes(number, info.total_episodes);

        Ok(EpisodeWatch {
            slug: slug.to_string(),
            title: info.title,
            episode_number: number,
            total_episodes: info.total_episodes,
            previous_episode,
            next_episode,
            sources: streaming.sources,
            referer: streaming.headers.and_then(|h| h.referer),
            download: streaming.download,
        })
    }

    async fn continue_watching(&self, user_id: i32) -> Result<Vec<HistoryEntry>, WatchError> {
        self.store
            .list_history(user_id, crate::constants::limits::DEFAULT_HISTORY_LIMIT)
            .await
            .map_err(|e| WatchError::Database(e.to_string()))
    }

    async fn record_progress(
        &self,
        user_id: i32,
        slug: &str,
        episode_number: i32,
    ) -> Result<i32, WatchError> {
        if episode_number < 1 {
            return Err(WatchError::EpisodeNotFound {
                slug: slug.to_string(),
                number: episode_number,
            });
        }

        let (title, image) = self.card_fields(slug).await?;

        self.store
            .upsert_history(user_id, slug, &title, image.as_deref(), episode_number)
            .await
            .map_err(|e| WatchError::Database(e.to_string()))?;

        Ok(episode_number)
    }

    async fn remove_history(&self, user_id: i32, slug: &str) -> Result<bool, WatchError> {
        self.store
            .remove_history(user_id, slug)
            .await
            .map_err(|e| WatchError::Database(e.to_string()))
    }

    async fn toggle_favorite(&self, user_id: i32, slug: &str) -> Result<bool, WatchError> {
        let is_favorite = self
            .store
            .is_favorite(user_id, slug)
            .await
            .map_err(|e| WatchError::Database(e.to_string()))?;

        if is_favorite {
            self.store
                .remove_favorite(user_id, slug)
                .await
                .map_err(|e| WatchError::Database(e.to_string()))?;
            info!(user_id, slug, "Removed favorite");
            return Ok(false);
        }

        let (title, image) = self.card_fields(slug).await?;

        self.store
            .add_favorite(user_id, slug, &title, image.as_deref())
            .await
            .map_err(|e| WatchError::Database(e.to_string()))?;
        info!(user_id, slug, "Added favorite");
        Ok(true)
    }

    async fn list_favorites(&self, user_id: i32) -> Result<Vec<FavoriteEntry>, WatchError> {
        self.store
            .list_favorites(user_id)
            .await
            .map_err(|e| WatchError::Database(e.to_string()))
    }

    async fn is_favorite(&self, user_id: i32, slug: &str) -> Result<bool, WatchError> {
        self.store
            .is_favorite(user_id, slug)
            .await
            .map_err(|e| WatchError::Database(e.to_string()))
    }
}
