use super::ApiError;
use crate::constants::limits::MAX_SEARCH_QUERY_LEN;

/// Content-API slugs are lowercase kebab identifiers (`sousou-no-frieren`).
pub fn validate_slug(slug: &str) -> Result<&str, ApiError> {
    if slug.is_empty() {
        return Err(ApiError::validation("Slug cannot be empty"));
    }

    if slug.len() > 200 {
        return Err(ApiError::validation("Slug must be 200 characters or less"));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ApiError::validation(
            "Slug can only contain lowercase letters, digits, and hyphens",
        ));
    }

    Ok(slug)
}

pub fn validate_episode_number(episode: i32) -> Result<i32, ApiError> {
    if episode <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid episode number: {}. Episode must be a positive integer",
            episode
        )));
    }
    Ok(episode)
}

pub fn validate_search_query(query: &str) -> Result<&str, ApiError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Search query cannot be empty"));
    }
    if trimmed.len() > MAX_SEARCH_QUERY_LEN {
        return Err(ApiError::validation("Search query is too long"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("one-piece").is_ok());
        assert!(validate_slug("86-2nd-season").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("One Piece").is_err());
        assert!(validate_slug("../etc/passwd").is_err());
        assert!(validate_slug(&"a".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_episode_number() {
        assert!(validate_episode_number(1).is_ok());
        assert!(validate_episode_number(1080).is_ok());
        assert!(validate_episode_number(0).is_err());
        assert!(validate_episode_number(-1).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert!(validate_search_query("Steins Gate").is_ok());
        assert!(validate_search_query("  trimmed  ").is_ok());
        assert!(validate_search_query("").is_err());
        assert!(validate_search_query("   ").is_err());
        assert!(validate_search_query(&"q".repeat(200)).is_err());
    }
}
