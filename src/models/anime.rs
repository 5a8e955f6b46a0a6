use serde::{Deserialize, Serialize};

/// Fully merged detail view for one anime: content-API fields as the base,
/// graph-API fields layered on top when a match was found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimeDetail {
    pub slug: String,

    /// AniList media id, when the graph lookup matched.
    pub anilist_id: Option<i32>,

    /// Display title from the content API.
    pub title: String,

    /// Graph-API english title when present, content title otherwise.
    pub preferred_title: String,

    pub description: Option<String>,

    pub cover_image: Option<String>,

    /// Wide banner, only the graph API has these.
    pub banner_image: Option<String>,

    pub genres: Vec<String>,

    pub status: Option<String>,

    pub release_date: Option<String>,

    pub total_episodes: Option<i32>,

    pub episodes: Vec<EpisodeRef>,

    pub relations: Vec<RelatedMedia>,
}

/// One playable episode as listed by the content API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRef {
    /// Content-API episode id, used for the streaming-source lookup.
    pub id: String,
    pub number: i32,
}

/// A related-media edge from the metadata graph (sequel, side story, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedMedia {
    pub anilist_id: i32,
    pub title: String,
    pub image: Option<String>,
    pub year: Option<i32>,
    pub media_type: Option<String>,
    pub relation: Option<String>,
    pub site_url: Option<String>,
}

/// Card shown in browse rows (recent, trending, search).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimeCard {
    pub slug: String,
    pub title: String,
    pub image: Option<String>,
    /// Latest episode number for recent-release cards.
    pub episode_number: Option<i32>,
}

/// A page of cards from the content API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardPage {
    pub current_page: u32,
    pub has_next_page: bool,
    pub results: Vec<AnimeCard>,
}
