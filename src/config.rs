use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub providers: ProviderConfig,

    pub oauth: OAuthConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    #[serde(default)]
    pub suppress_connection_errors: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/yume.db".to_string(),
            log_level: "info".to_string(),
            suppress_connection_errors: false,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    /// Public base URL of this instance, used to build OAuth redirect URIs.
    pub public_url: String,

    pub cors_allowed_origins: Vec<String>,

    /// Whether to set the Secure flag on session cookies.
    /// Default: true for production safety. Set to false for local development without HTTPS.
    pub secure_cookies: bool,

    /// Session inactivity expiry in minutes.
    pub session_expiry_minutes: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 4456,
            public_url: "http://localhost:4456".to_string(),
            cors_allowed_origins: vec![
                "http://localhost:4456".to_string(),
                "http://127.0.0.1:4456".to_string(),
            ],
            secure_cookies: true,
            session_expiry_minutes: 7 * 24 * 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the content-aggregation API (Consumet, gogoanime provider).
    pub consumet_url: String,

    /// Base URL of the metadata graph API (AniList GraphQL).
    pub anilist_url: String,

    pub request_timeout_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            consumet_url: crate::constants::upstream::CONSUMET_GOGOANIME.to_string(),
            anilist_url: crate::constants::upstream::ANILIST_GRAPHQL.to_string(),
            request_timeout_seconds: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    /// AniList OAuth application client id.
    /// Overridden by the ANILIST_CLIENT_ID environment variable when set.
    pub client_id: String,

    /// AniList OAuth application client secret.
    /// Overridden by the ANILIST_CLIENT_SECRET environment variable when set.
    /// Prefer the environment variable over committing the secret to config.toml.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_secret: String,

    pub authorize_url: String,

    pub token_url: String,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            authorize_url: crate::constants::upstream::ANILIST_AUTHORIZE.to_string(),
            token_url: crate::constants::upstream::ANILIST_TOKEN.to_string(),
        }
    }
}

impl OAuthConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            providers: ProviderConfig::default(),
            oauth: OAuthConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Secrets may live in a .env file next to the binary.
        dotenvy::dotenv().ok();

        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(id) = std::env::var("ANILIST_CLIENT_ID") {
            self.oauth.client_id = id;
        }
        if let Ok(secret) = std::env::var("ANILIST_CLIENT_SECRET") {
            self.oauth.client_secret = secret;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("yume").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".yume").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.is_empty() {
            anyhow::bail!("Database path cannot be empty");
        }

        if self.providers.consumet_url.is_empty() {
            anyhow::bail!("Content API URL cannot be empty");
        }

        if self.server.public_url.is_empty() {
            anyhow::bail!("Public URL cannot be empty");
        }

        url::Url::parse(&self.server.public_url).context("Invalid public URL")?;

        if self.server.session_expiry_minutes <= 0 {
            anyhow::bail!("Session expiry must be positive");
        }

        Ok(())
    }

    /// Redirect URI registered with the OAuth provider.
    #[must_use]
    pub fn oauth_redirect_uri(&self) -> String {
        format!(
            "{}/api/auth/callback",
            self.server.public_url.trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn redirect_uri_strips_trailing_slash() {
        let mut config = Config::default();
        config.server.public_url = "https://yume.example.com/".to_string();
        assert_eq!(
            config.oauth_redirect_uri(),
            "https://yume.example.com/api/auth/callback"
        );
    }

    #[test]
    fn invalid_public_url_rejected() {
        let mut config = Config::default();
        config.server.public_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn oauth_configured_requires_both_parts() {
        let mut oauth = OAuthConfig::default();
        assert!(!oauth.is_configured());
        oauth.client_id = "123".to_string();
        assert!(!oauth.is_configured());
        oauth.client_secret = "shh".to_string();
        assert!(oauth.is_configured());
    }
}
