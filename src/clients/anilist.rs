use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct GraphQLRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct Media {
    pub id: i32,
    pub title: Title,
    pub description: Option<String>,
    #[serde(rename = "bannerImage")]
    pub banner_image: Option<String>,
    #[serde(rename = "coverImage")]
    pub cover_image: Option<CoverImage>,
    pub episodes: Option<i32>,
    pub relations: Option<Relations>,
}

#[derive(Debug, Deserialize)]
pub struct Title {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoverImage {
    #[serde(rename = "extraLarge")]
    pub extra_large: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Relations {
    pub edges: Vec<RelationEdge>,
}

#[derive(Debug, Deserialize)]
pub struct RelationEdge {
    #[serde(rename = "relationType")]
    pub relation_type: Option<String>,
    pub node: RelationNode,
}

#[derive(Debug, Deserialize)]
pub struct RelationNode {
    pub id: i32,
    pub title: Title,
    #[serde(rename = "coverImage")]
    pub cover_image: Option<CoverImage>,
    #[serde(rename = "startDate")]
    pub start_date: Option<StartDate>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    #[serde(rename = "siteUrl")]
    pub site_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StartDate {
    pub year: Option<i32>,
}

/// The signed-in AniList account, fetched with the user's access token.
#[derive(Debug, Deserialize)]
pub struct Viewer {
    pub id: i64,
    pub name: String,
    pub avatar: Option<ViewerAvatar>,
}

#[derive(Debug, Deserialize)]
pub struct ViewerAvatar {
    pub large: Option<String>,
}

#[derive(Clone)]
pub struct AnilistClient {
    client: Client,
    base_url: String,
}

impl AnilistClient {
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

    /// Best-match media lookup by title. The graph side of the metadata merge.
    pub async fn find_media(&self, search: &str) -> Result<Option<Media>> {
        let gql_query = r#"
            query ($search: String) {
                Media(search: $search, type: ANIME) {
                    id
                    title { romaji english native }
                    description(asHtml: false)
                    bannerImage
                    coverImage { extraLarge large }
                    episodes
                    relations {
                        edges {
                            relationType
                            node {
                                id
                                title { romaji english native }
                                coverImage { extraLarge large }
                                startDate { year }
                                type
                                siteUrl
                            }
                        }
                    }
                }
            }
        "#;

        #[derive(Serialize)]
        struct SearchVars<'a> {
            search: &'a str,
        }

        #[derive(Deserialize)]
        struct MediaWrapper {
            #[serde(rename = "Media")]
            media: Option<Media>,
        }

        let request_body = GraphQLRequest {
            query: gql_query,
            variables: SearchVars { search },
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request_body)
            .send()
            .await?;

        // AniList answers an unmatched search with 404 plus a GraphQL error body.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("AniList API error: {} - {}", status, body));
        }

        let response: GraphQLResponse<MediaWrapper> = response.json().await?;

        Ok(response.data.and_then(|d| d.media))
    }

    /// OAuth authorization-code exchange against the provider token endpoint.
    pub async fn exchange_code(
        &self,
        token_url: &str,
        client_id: &str,
        client_secret: &str,
        redirect_uri: &str,
        code: &str,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct TokenRequest<'a> {
            grant_type: &'a str,
            client_id: &'a str,
            client_secret: &'a str,
            redirect_uri: &'a str,
            code: &'a str,
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
        }

        let response = self
            .client
            .post(token_url)
            .json(&TokenRequest {
                grant_type: "authorization_code",
                client_id,
                client_secret,
                redirect_uri,
                code,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "OAuth token exchange failed: {} - {}",
                status,
                body
            ));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// Fetch the account behind an access token.
    pub async fn viewer(&self, access_token: &str) -> Result<Viewer> {
        let gql_query = r#"
            query {
                Viewer {
                    id
                    name
                    avatar { large }
                }
            }
        "#;

        #[derive(Serialize)]
        struct NoVars {}

        #[derive(Deserialize)]
        struct ViewerWrapper {
            #[serde(rename = "Viewer")]
            viewer: Option<Viewer>,
        }

        let request_body = GraphQLRequest {
            query: gql_query,
            variables: NoVars {},
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(access_token)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("AniList API error: {} - {}", status, body));
        }

        let response: GraphQLResponse<ViewerWrapper> = response.json().await?;

        response
            .data
            .and_then(|d| d.viewer)
            .ok_or_else(|| anyhow::anyhow!("AniList returned no viewer for access token"))
    }
}
