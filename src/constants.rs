pub const USER_AGENT: &str = concat!("Yume/", env!("CARGO_PKG_VERSION"));

pub mod upstream {

    pub const ANILIST_GRAPHQL: &str = "https://graphql.anilist.co";

    pub const ANILIST_AUTHORIZE: &str = "https://anilist.co/api/v2/oauth/authorize";

    pub const ANILIST_TOKEN: &str = "https://anilist.co/api/v2/oauth/token";

    pub const CONSUMET_GOGOANIME: &str = "https://api.consumet.org/anime/gogoanime";
}

pub mod session {

    pub const USER_ID_KEY: &str = "user_id";

    pub const OAUTH_STATE_KEY: &str = "oauth_state";
}

pub mod limits {

    pub const MAX_SEARCH_QUERY_LEN: usize = 120;

    pub const DEFAULT_HISTORY_LIMIT: u64 = 20;

    pub const MAX_RELATIONS: usize = 12;
}
