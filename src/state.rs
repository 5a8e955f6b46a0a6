use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::anilist::AnilistClient;
use crate::clients::consumet::ConsumetClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AnilistAuthService, AuthService, CatalogService, DefaultCatalogService, DefaultWatchService,
    WatchService,
};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// Reused across both upstream clients to enable connection pooling.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(crate::constants::USER_AGENT)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub consumet: Arc<ConsumetClient>,

    pub anilist: Arc<AnilistClient>,

    pub catalog_service: Arc<dyn CatalogService>,

    pub watch_service: Arc<dyn WatchService>,

    pub auth_service: Arc<dyn AuthService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client = build_shared_http_client(config.providers.request_timeout_seconds)?;

        let consumet = Arc::new(ConsumetClient::with_shared_client(
            http_client.clone(),
            config.providers.consumet_url.clone(),
        ));
        let anilist = Arc::new(AnilistClient::with_shared_client(
            http_client,
            config.providers.anilist_url.clone(),
        ));

        let config_arc = Arc::new(RwLock::new(config));

        let catalog_service = Arc::new(DefaultCatalogService::new(
            consumet.clone(),
            anilist.clone(),
            store.clone(),
        )) as Arc<dyn CatalogService>;

        let watch_service = Arc::new(DefaultWatchService::new(consumet.clone(), store.clone()))
            as Arc<dyn WatchService>;

        let auth_service = Arc::new(AnilistAuthService::new(
            anilist.clone(),
            store.clone(),
            config_arc.clone(),
        )) as Arc<dyn AuthService>;

        Ok(Self {
            config: config_arc,
            store,
            consumet,
            anilist,
            catalog_service,
            watch_service,
            auth_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
