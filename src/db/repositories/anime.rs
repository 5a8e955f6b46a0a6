use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::debug;

use crate::entities::anime;

pub struct AnimeRepository {
    conn: DatabaseConnection,
}

impl AnimeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Refresh the cached row for a resolved detail page. Keyed by AniList id;
    /// the slug column carries the content-API identifier.
    pub async fn upsert(
        &self,
        anilist_id: i32,
        slug: &str,
        title: &str,
        image: Option<&str>,
        episodes: Option<i32>,
    ) -> Result<()> {
        let active = anime::ActiveModel {
            anilist_id: Set(anilist_id),
            slug: Set(slug.to_string()),
            title: Set(title.to_string()),
            image: Set(image.map(ToString::to_string)),
            episodes: Set(episodes),
            updated_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        anime::Entity::insert(active)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(anime::Column::AnilistId)
                    .update_columns([
                        anime::Column::Slug,
                        anime::Column::Title,
                        anime::Column::Image,
                        anime::Column::Episodes,
                        anime::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await
            .context("Failed to upsert anime row")?;

        debug!(slug, anilist_id, "Cached anime metadata");
        Ok(())
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<anime::Model>> {
        anime::Entity::find()
            .filter(anime::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query anime by slug")
    }
}
