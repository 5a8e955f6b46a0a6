//! Concrete `CatalogService` backed by the two upstream clients and the store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::clients::anilist::AnilistClient;
use crate::clients::consumet::ConsumetClient;
use crate::db::Store;
use crate::models::anime::{AnimeDetail, CardPage};
use crate::services::catalog_service::{
    CatalogError, CatalogService, HomePage, airing_to_card, hit_to_card, merge_detail,
    recent_to_card,
};

pub struct DefaultCatalogService {
    consumet: Arc<ConsumetClient>,
    anilist: Arc<AnilistClient>,
    store: Store,
}

impl DefaultCatalogService {
    #[must_use]
    pub const fn new(consumet: Arc<ConsumetClient>, anilist: Arc<AnilistClient>, store: Store) -> Self {
        Self {
            consumet,
            anilist,
            store,
        }
    }
}

#[async_trait]
impl CatalogService for DefaultCatalogService {
    async fn home(&self) -> Result<HomePage, CatalogError> {
        let (recent, trending) = futures::future::try_join(
            self.consumet.recent_episodes(1),
            self.consumet.top_airing(1),
        )
        .await
        .map_err(|e| CatalogError::content_error(e.to_string()))?;

        Ok(HomePage {
            recent: recent.results.into_iter().map(recent_to_card).collect(),
            trending: trending.results.into_iter().map(airing_to_card).collect(),
        })
    }

    async fn search(&self, query: &str, page: u32) -> Result<CardPage, CatalogError> {
        let hits = self
            .consumet
            .search(query, page)
            .await
            .map_err(|e| CatalogError::content_error(e.to_string()))?;

        Ok(CardPage {
            current_page: hits.current_page,
            has_next_page: hits.has_next_page,
            results: hits.results.into_iter().map(hit_to_card).collect(),
        })
    }

    async fn anime_detail(&self, slug: &str) -> Result<AnimeDetail, CatalogError> {
        let info = self
            .consumet
            .anime_info(slug)
            .await
            .map_err(|e| CatalogError::content_error(e.to_string()))?
            .ok_or_else(|| CatalogError::NotFound(slug.to_string()))?;

        // Graph enrichment is best-effort: a miss or an outage degrades the
        // page, it must never fail it.
        let media = match self.anilist.find_media(&info.title).await {
            Ok(media) => media,
            Err(e) => {
                warn!(slug, "Metadata graph lookup failed: {e}");
                None
            }
        };

        let detail = merge_detail(slug, info, media);

        if let Some(anilist_id) = detail.anilist_id
            && let Err(e) = self
                .store
                .upsert_anime(
                    anilist_id,
                    &detail.slug,
                    &detail.title,
                    detail.cover_image.as_deref(),
                    detail.total_episodes,
                )
                .await
        {
            warn!(slug, "Failed to cache anime row: {e}");
        }

        Ok(detail)
    }
}
