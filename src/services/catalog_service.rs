//! Domain service for browsing and the two-source metadata merge.

use crate::clients::anilist::Media;
use crate::clients::consumet::{AnimeInfo, RecentEpisode, SearchHit, TopAiringEntry};
use crate::constants::limits::MAX_RELATIONS;
use crate::models::anime::{AnimeCard, AnimeDetail, CardPage, EpisodeRef, RelatedMedia};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Anime not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("External API error: {service} - {message}")]
    ExternalApi { service: String, message: String },
}

impl CatalogError {
    pub fn content_error(msg: impl Into<String>) -> Self {
        Self::ExternalApi {
            service: "Consumet".to_string(),
            message: msg.into(),
        }
    }
}

/// Landing-page view model: latest releases plus what is currently airing.
#[derive(Debug, serde::Serialize)]
pub struct HomePage {
    pub recent: Vec<AnimeCard>,
    pub trending: Vec<AnimeCard>,
}

#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Composes the landing page from the content API's recent and top-airing
    /// feeds, fetched concurrently.
    async fn home(&self) -> Result<HomePage, CatalogError>;

    /// Title search against the content API.
    async fn search(&self, query: &str, page: u32) -> Result<CardPage, CatalogError>;

    /// Resolves a slug to the merged detail view. The graph lookup is
    /// best-effort: when it fails or finds no match, the detail is served
    /// from the content API alone.
    async fn anime_detail(&self, slug: &str) -> Result<AnimeDetail, CatalogError>;
}

/// Merge a content-API record with an optional metadata-graph record.
///
/// The content API owns identity (slug), the episode list, genres and the
/// cover; the graph contributes the banner, the localized preferred title,
/// a richer description and related-media edges.
#[must_use]
pub fn merge_detail(slug: &str, info: AnimeInfo, media: Option<Media>) -> AnimeDetail {
    let mut episodes: Vec<EpisodeRef> = info
        .episodes
        .into_iter()
        .map(|e| EpisodeRef {
            id: e.id,
            number: e.number,
        })
        .collect();
    // Newest first, the way the episode rail renders.
    episodes.sort_by(|a, b| b.number.cmp(&a.number));

    let (anilist_id, preferred_title, description, banner_image, relations) = match media {
        Some(m) => {
            let preferred = m
                .title
                .english
                .clone()
                .unwrap_or_else(|| info.title.clone());
            let description = m.description.or_else(|| info.description.clone());
            let relations = m
                .relations
                .map(|r| {
                    r.edges
                        .into_iter()
                        .take(MAX_RELATIONS)
                        .map(|edge| RelatedMedia {
                            anilist_id: edge.node.id,
                            title: edge
                                .node
                                .title
                                .english
                                .or(edge.node.title.romaji)
                                .unwrap_or_default(),
                            image: edge
                                .node
                                .cover_image
                                .and_then(|c| c.large.or(c.extra_large)),
                            year: edge.node.start_date.and_then(|d| d.year),
                            media_type: edge.node.media_type,
                            relation: edge.relation_type,
                            site_url: edge.node.site_url,
                        })
                        .collect()
                })
                .unwrap_or_default();
            (
                Some(m.id),
                preferred,
                description,
                m.banner_image,
                relations,
            )
        }
        None => (
            None,
            info.title.clone(),
            info.description.clone(),
            None,
            Vec::new(),
        ),
    };

    AnimeDetail {
        slug: slug.to_string(),
        anilist_id,
        title: info.title,
        preferred_title,
        description,
        cover_image: info.image,
        banner_image,
        genres: info.genres,
        status: info.status,
        release_date: info.release_date,
        total_episodes: info.total_episodes,
        episodes,
        relations,
    }
}

pub(crate) fn recent_to_card(entry: RecentEpisode) -> AnimeCard {
    AnimeCard {
        slug: entry.id,
        title: entry.title,
        image: entry.image,
        episode_number: entry.episode_number,
    }
}

pub(crate) fn airing_to_card(entry: TopAiringEntry) -> AnimeCard {
    AnimeCard {
        slug: entry.id,
        title: entry.title,
        image: entry.image,
        episode_number: None,
    }
}

pub(crate) fn hit_to_card(hit: SearchHit) -> AnimeCard {
    AnimeCard {
        slug: hit.id,
        title: hit.title,
        image: hit.image,
        episode_number: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::anilist::{CoverImage, RelationEdge, RelationNode, Relations, StartDate, Title};
    use crate::clients::consumet::EpisodeEntry;

    fn sample_info() -> AnimeInfo {
        AnimeInfo {
            id: "frieren".to_string(),
            title: "Sousou no Frieren".to_string(),
            image: Some("https://img.example/frieren.jpg".to_string()),
            description: Some("Content description".to_string()),
            genres: vec!["Adventure".to_string(), "Fantasy".to_string()],
            status: Some("Completed".to_string()),
            release_date: Some("2023".to_string()),
            total_episodes: Some(28),
            episodes: vec![
                EpisodeEntry {
                    id: "frieren-episode-1".to_string(),
                    number: 1,
                },
                EpisodeEntry {
                    id: "frieren-episode-2".to_string(),
                    number: 2,
                },
            ],
        }
    }

    fn sample_media() -> Media {
        Media {
            id: 154587,
            title: Title {
                romaji: Some("Sousou no Frieren".to_string()),
                english: Some("Frieren: Beyond Journey's End".to_string()),
                native: None,
            },
            description: Some("Graph description".to_string()),
            banner_image: Some("https://img.example/banner.jpg".to_string()),
            cover_image: None,
            episodes: Some(28),
            relations: Some(Relations {
                edges: vec![RelationEdge {
                    relation_type: Some("SEQUEL".to_string()),
                    node: RelationNode {
                        id: 999,
                        title: Title {
                            romaji: Some("Second Season".to_string()),
                            english: None,
                            native: None,
                        },
                        cover_image: Some(CoverImage {
                            extra_large: None,
                            large: Some("https://img.example/s2.jpg".to_string()),
                        }),
                        start_date: Some(StartDate { year: Some(2026) }),
                        media_type: Some("ANIME".to_string()),
                        site_url: Some("https://anilist.co/anime/999".to_string()),
                    },
                }],
            }),
        }
    }

    #[test]
    fn merge_prefers_graph_fields_when_present() {
        let detail = merge_detail("frieren", sample_info(), Some(sample_media()));

        assert_eq!(detail.anilist_id, Some(154587));
        assert_eq!(detail.title, "Sousou no Frieren");
        assert_eq!(detail.preferred_title, "Frieren: Beyond Journey's End");
        assert_eq!(detail.description.as_deref(), Some("Graph description"));
        assert_eq!(
            detail.banner_image.as_deref(),
            Some("https://img.example/banner.jpg")
        );
        assert_eq!(detail.relations.len(), 1);
        assert_eq!(detail.relations[0].title, "Second Season");
        assert_eq!(detail.relations[0].year, Some(2026));
    }

    #[test]
    fn merge_degrades_to_content_only() {
        let detail = merge_detail("frieren", sample_info(), None);

        assert_eq!(detail.anilist_id, None);
        assert_eq!(detail.preferred_title, "Sousou no Frieren");
        assert_eq!(detail.description.as_deref(), Some("Content description"));
        assert!(detail.banner_image.is_none());
        assert!(detail.relations.is_empty());
    }

    #[test]
    fn merge_falls_back_per_field_not_per_record() {
        let mut media = sample_media();
        media.title.english = None;
        media.description = None;

        let detail = merge_detail("frieren", sample_info(), Some(media));

        // Missing graph fields fall back individually to content values.
        assert_eq!(detail.preferred_title, "Sousou no Frieren");
        assert_eq!(detail.description.as_deref(), Some("Content description"));
        assert_eq!(detail.anilist_id, Some(154587));
    }

    #[test]
    fn merge_orders_episodes_newest_first() {
        let detail = merge_detail("frieren", sample_info(), None);

        let numbers: Vec<i32> = detail.episodes.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![2, 1]);
    }

    #[test]
    fn relation_title_falls_back_to_romaji() {
        let detail = merge_detail("frieren", sample_info(), Some(sample_media()));
        // The sequel edge has no english title; romaji is used.
        assert_eq!(detail.relations[0].title, "Second Season");
    }
}
