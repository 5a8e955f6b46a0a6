use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::favorites;

#[derive(Debug, Clone)]
pub struct FavoriteEntry {
    pub slug: String,
    pub title: String,
    pub image: Option<String>,
    pub created_at: String,
}

impl From<favorites::Model> for FavoriteEntry {
    fn from(model: favorites::Model) -> Self {
        Self {
            slug: model.slug,
            title: model.title,
            image: model.image,
            created_at: model.created_at,
        }
    }
}

pub struct FavoriteRepository {
    conn: DatabaseConnection,
}

impl FavoriteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Idempotent: adding an existing favorite is a no-op.
    pub async fn add(
        &self,
        user_id: i32,
        slug: &str,
        title: &str,
        image: Option<&str>,
    ) -> Result<()> {
        let active = favorites::ActiveModel {
            user_id: Set(user_id),
            slug: Set(slug.to_string()),
            title: Set(title.to_string()),
            image: Set(image.map(ToString::to_string)),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        favorites::Entity::insert(active)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    favorites::Column::UserId,
                    favorites::Column::Slug,
                ])
                .do_nothing()
                .to_owned(),
            )
            .do_nothing()
            .exec(&self.conn)
            .await
            .context("Failed to insert favorite")?;

        Ok(())
    }

    pub async fn remove(&self, user_id: i32, slug: &str) -> Result<bool> {
        let result = favorites::Entity::delete_many()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::Slug.eq(slug))
            .exec(&self.conn)
            .await
            .context("Failed to delete favorite")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn contains(&self, user_id: i32, slug: &str) -> Result<bool> {
        let row = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query favorite")?;

        Ok(row.is_some())
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<FavoriteEntry>> {
        let rows = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .order_by_desc(favorites::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list favorites")?;

        Ok(rows.into_iter().map(FavoriteEntry::from).collect())
    }
}
