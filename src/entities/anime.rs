use sea_orm::entity::prelude::*;

/// Cached anime rows, refreshed whenever a detail page resolves both sources.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "anime")]
pub struct Model {
    /// AniList media id.
    #[sea_orm(primary_key, auto_increment = false)]
    pub anilist_id: i32,

    /// Content-API identifier, used in every watch/history route.
    #[sea_orm(unique)]
    pub slug: String,

    pub title: String,

    pub image: Option<String>,

    pub episodes: Option<i32>,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
