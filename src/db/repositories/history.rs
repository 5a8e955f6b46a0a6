use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::histories;

/// A "continue watching" row as read back for a user.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub slug: String,
    pub title: String,
    pub image: Option<String>,
    pub episode_number: i32,
    pub updated_at: String,
}

impl From<histories::Model> for HistoryEntry {
    fn from(model: histories::Model) -> Self {
        Self {
            slug: model.slug,
            title: model.title,
            image: model.image,
            episode_number: model.episode_number,
            updated_at: model.updated_at,
        }
    }
}

pub struct HistoryRepository {
    conn: DatabaseConnection,
}

impl HistoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Record playback progress. One row per (user, slug): a later episode for
    /// the same anime replaces the earlier one.
    pub async fn upsert(
        &self,
        user_id: i32,
        slug: &str,
        title: &str,
        image: Option<&str>,
        episode_number: i32,
    ) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = histories::ActiveModel {
            user_id: Set(user_id),
            slug: Set(slug.to_string()),
            title: Set(title.to_string()),
            image: Set(image.map(ToString::to_string)),
            episode_number: Set(episode_number),
            updated_at: Set(now),
            ..Default::default()
        };

        histories::Entity::insert(active)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    histories::Column::UserId,
                    histories::Column::Slug,
                ])
                .update_columns([
                    histories::Column::Title,
                    histories::Column::Image,
                    histories::Column::EpisodeNumber,
                    histories::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec(&self.conn)
            .await
            .context("Failed to upsert history row")?;

        Ok(())
    }

    pub async fn get(&self, user_id: i32, slug: &str) -> Result<Option<HistoryEntry>> {
        let row = histories::Entity::find()
            .filter(histories::Column::UserId.eq(user_id))
            .filter(histories::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query history row")?;

        Ok(row.map(HistoryEntry::from))
    }

    pub async fn list_recent(&self, user_id: i32, limit: u64) -> Result<Vec<HistoryEntry>> {
        let rows = histories::Entity::find()
            .filter(histories::Column::UserId.eq(user_id))
            .order_by_desc(histories::Column::UpdatedAt)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list history rows")?;

        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }

    pub async fn remove(&self, user_id: i32, slug: &str) -> Result<bool> {
        let result = histories::Entity::delete_many()
            .filter(histories::Column::UserId.eq(user_id))
            .filter(histories::Column::Slug.eq(slug))
            .exec(&self.conn)
            .await
            .context("Failed to delete history row")?;

        Ok(result.rows_affected > 0)
    }
}
