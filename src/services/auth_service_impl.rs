//! AniList-backed implementation of the `AuthService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::clients::anilist::AnilistClient;
use crate::config::Config;
use crate::db::{Store, User};
use crate::services::auth_service::{AuthError, AuthService};

pub struct AnilistAuthService {
    anilist: Arc<AnilistClient>,
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl AnilistAuthService {
    #[must_use]
    pub const fn new(anilist: Arc<AnilistClient>, store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self {
            anilist,
            store,
            config,
        }
    }
}

#[async_trait]
impl AuthService for AnilistAuthService {
    async fn authorize_url(&self, state: &str) -> Result<String, AuthError> {
        let config = self.config.read().await;

        if !config.oauth.is_configured() {
            return Err(AuthError::NotConfigured);
        }

        Ok(format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&state={}",
            config.oauth.authorize_url,
            urlencoding::encode(&config.oauth.client_id),
            urlencoding::encode(&config.oauth_redirect_uri()),
            urlencoding::encode(state),
        ))
    }

    async fn complete_login(&self, code: &str) -> Result<User, AuthError> {
        let (token_url, client_id, client_secret, redirect_uri) = {
            let config = self.config.read().await;
            if !config.oauth.is_configured() {
                return Err(AuthError::NotConfigured);
            }
            (
                config.oauth.token_url.clone(),
                config.oauth.client_id.clone(),
                config.oauth.client_secret.clone(),
                config.oauth_redirect_uri(),
            )
        };

        let access_token = self
            .anilist
            .exchange_code(&token_url, &client_id, &client_secret, &redirect_uri, code)
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let viewer = self
            .anilist
            .viewer(&access_token)
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let avatar = viewer.avatar.and_then(|a| a.large);

        let user = self
            .store
            .upsert_user(viewer.id, &viewer.name, avatar.as_deref())
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        info!(user_id = user.id, username = %user.username, "User signed in");
        Ok(user)
    }

    async fn current_user(&self, user_id: i32) -> Result<Option<User>, AuthError> {
        self.store
            .get_user(user_id)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))
    }
}
