use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::favorite::FavoriteEntry;
pub use repositories::history::HistoryEntry;
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") && !db_url.contains("::memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn anime_repo(&self) -> repositories::anime::AnimeRepository {
        repositories::anime::AnimeRepository::new(self.conn.clone())
    }

    fn history_repo(&self) -> repositories::history::HistoryRepository {
        repositories::history::HistoryRepository::new(self.conn.clone())
    }

    fn favorite_repo(&self) -> repositories::favorite::FavoriteRepository {
        repositories::favorite::FavoriteRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    pub async fn upsert_anime(
        &self,
        anilist_id: i32,
        slug: &str,
        title: &str,
        image: Option<&str>,
        episodes: Option<i32>,
    ) -> Result<()> {
        self.anime_repo()
            .upsert(anilist_id, slug, title, image, episodes)
            .await
    }

    pub async fn get_anime_by_slug(&self, slug: &str) -> Result<Option<crate::entities::anime::Model>> {
        self.anime_repo().get_by_slug(slug).await
    }

    pub async fn upsert_history(
        &self,
        user_id: i32,
        slug: &str,
        title: &str,
        image: Option<&str>,
        episode_number: i32,
    ) -> Result<()> {
        self.history_repo()
            .upsert(user_id, slug, title, image, episode_number)
            .await
    }

    pub async fn get_history(&self, user_id: i32, slug: &str) -> Result<Option<HistoryEntry>> {
        self.history_repo().get(user_id, slug).await
    }

    pub async fn list_history(&self, user_id: i32, limit: u64) -> Result<Vec<HistoryEntry>> {
        self.history_repo().list_recent(user_id, limit).await
    }

    pub async fn remove_history(&self, user_id: i32, slug: &str) -> Result<bool> {
        self.history_repo().remove(user_id, slug).await
    }

    pub async fn add_favorite(
        &self,
        user_id: i32,
        slug: &str,
        title: &str,
        image: Option<&str>,
    ) -> Result<()> {
        self.favorite_repo().add(user_id, slug, title, image).await
    }

    pub async fn remove_favorite(&self, user_id: i32, slug: &str) -> Result<bool> {
        self.favorite_repo().remove(user_id, slug).await
    }

    pub async fn is_favorite(&self, user_id: i32, slug: &str) -> Result<bool> {
        self.favorite_repo().contains(user_id, slug).await
    }

    pub async fn list_favorites(&self, user_id: i32) -> Result<Vec<FavoriteEntry>> {
        self.favorite_repo().list(user_id).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_anilist_id(&self, anilist_id: i64) -> Result<Option<User>> {
        self.user_repo().get_by_anilist_id(anilist_id).await
    }

    pub async fn upsert_user(
        &self,
        anilist_id: i64,
        username: &str,
        avatar_url: Option<&str>,
    ) -> Result<User> {
        self.user_repo()
            .upsert_from_provider(anilist_id, username, avatar_url)
            .await
    }
}
