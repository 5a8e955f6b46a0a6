use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

/// One page of results from the content API's list endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage<T> {
    #[serde(default = "default_page")]
    pub current_page: u32,
    #[serde(default)]
    pub has_next_page: bool,
    pub results: Vec<T>,
}

const fn default_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEpisode {
    pub id: String,
    pub title: String,
    pub image: Option<String>,
    pub episode_number: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopAiringEntry {
    pub id: String,
    pub title: String,
    pub image: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub image: Option<String>,
    pub release_date: Option<String>,
    pub sub_or_dub: Option<String>,
}

/// Detail record for one slug, the base of the merged view model.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeInfo {
    pub id: String,
    pub title: String,
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub status: Option<String>,
    pub release_date: Option<String>,
    pub total_episodes: Option<i32>,
    #[serde(default)]
    pub episodes: Vec<EpisodeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeEntry {
    pub id: String,
    pub number: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingData {
    pub headers: Option<StreamHeaders>,
    pub sources: Vec<VideoSource>,
    pub download: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamHeaders {
    pub referer: Option<String>,
}

#[derive(Debug, Deserialize, serde::Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VideoSource {
    pub url: String,
    pub quality: Option<String>,
    #[serde(default)]
    pub is_m3u8: bool,
}

#[derive(Clone)]
pub struct ConsumetClient {
    client: Client,
    base_url: String,
}

impl ConsumetClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn with_shared_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub async fn recent_episodes(&self, page: u32) -> Result<ResultPage<RecentEpisode>> {
        let url = format!("{}/recent-episodes?page={}", self.base_url, page);
        self.get_json(&url).await
    }

    pub async fn top_airing(&self, page: u32) -> Result<ResultPage<TopAiringEntry>> {
        let url = format!("{}/top-airing?page={}", self.base_url, page);
        self.get_json(&url).await
    }

    pub async fn search(&self, query: &str, page: u32) -> Result<ResultPage<SearchHit>> {
        let url = format!(
            "{}/{}?page={}",
            self.base_url,
            urlencoding::encode(query),
            page
        );
        self.get_json(&url).await
    }

    /// Detail lookup by slug. Unknown slugs come back as `None`.
    pub async fn anime_info(&self, slug: &str) -> Result<Option<AnimeInfo>> {
        let url = format!("{}/info/{}", self.base_url, urlencoding::encode(slug));
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Content API error: {} - {}", status, body));
        }

        let info: AnimeInfo = response.json().await?;
        Ok(Some(info))
    }

    /// Streaming sources for one episode id (e.g. `one-piece-episode-1080`).
    pub async fn episode_sources(&self, episode_id: &str) -> Result<Option<StreamingData>> {
        let url = format!("{}/watch/{}", self.base_url, urlencoding::encode(episode_id));
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Content API error: {} - {}", status, body));
        }

        let data: StreamingData = response.json().await?;
        Ok(Some(data))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Content API error: {} - {}", status, body));
        }

        Ok(response.json().await?)
    }
}
