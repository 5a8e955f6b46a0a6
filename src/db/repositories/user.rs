use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::users;

/// User data returned from the repository.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub anilist_id: i64,
    pub username: String,
    pub avatar_url: Option<String>,
    pub created_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            anilist_id: model.anilist_id,
            username: model.username,
            avatar_url: model.avatar_url,
            created_at: model.created_at,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    pub async fn get_by_anilist_id(&self, anilist_id: i64) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::AnilistId.eq(anilist_id))
            .one(&self.conn)
            .await
            .context("Failed to query user by AniList id")?;

        Ok(user.map(User::from))
    }

    /// Insert a user on first sign-in, or refresh name/avatar on a repeat one.
    pub async fn upsert_from_provider(
        &self,
        anilist_id: i64,
        username: &str,
        avatar_url: Option<&str>,
    ) -> Result<User> {
        let now = chrono::Utc::now().to_rfc3339();

        let existing = users::Entity::find()
            .filter(users::Column::AnilistId.eq(anilist_id))
            .one(&self.conn)
            .await
            .context("Failed to query user for upsert")?;

        if let Some(user) = existing {
            let mut active: users::ActiveModel = user.into();
            active.username = Set(username.to_string());
            active.avatar_url = Set(avatar_url.map(ToString::to_string));
            active.updated_at = Set(now);
            let updated = active
                .update(&self.conn)
                .await
                .context("Failed to update user")?;
            return Ok(User::from(updated));
        }

        let active = users::ActiveModel {
            anilist_id: Set(anilist_id),
            username: Set(username.to_string()),
            avatar_url: Set(avatar_url.map(ToString::to_string)),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = active
            .insert(&self.conn)
            .await
            .context("Failed to insert user")?;

        Ok(User::from(inserted))
    }
}
