//! Domain service for OAuth sign-in against the metadata provider.

use crate::db::User;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("OAuth is not configured (set ANILIST_CLIENT_ID / ANILIST_CLIENT_SECRET)")]
    NotConfigured,

    #[error("OAuth state mismatch")]
    StateMismatch,

    #[error("OAuth provider error: {0}")]
    Provider(String),

    #[error("Database error: {0}")]
    Database(String),
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Authorize URL for the provider, carrying the session's CSRF state.
    async fn authorize_url(&self, state: &str) -> Result<String, AuthError>;

    /// Completes the authorization-code flow: exchanges the code, resolves
    /// the provider account, and upserts the local user row.
    async fn complete_login(&self, code: &str) -> Result<User, AuthError>;

    /// Loads the user behind a session id; `None` when the row is gone.
    async fn current_user(&self, user_id: i32) -> Result<Option<User>, AuthError>;
}

/// Random hex state for the OAuth round trip (32 chars).
#[must_use]
pub fn generate_state() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();

    bytes.iter().fold(String::with_capacity(32), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

/// Constant-time-ish state comparison is unnecessary here (the state is
/// single-use and session-bound), but both sides must be non-empty.
#[must_use]
pub fn states_match(expected: Option<&str>, received: &str) -> bool {
    match expected {
        Some(expected) => !expected.is_empty() && expected == received,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_state_is_hex() {
        let state = generate_state();
        assert_eq!(state.len(), 32);
        assert!(state.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_states_differ() {
        assert_ne!(generate_state(), generate_state());
    }

    #[test]
    fn state_match_requires_stored_state() {
        assert!(!states_match(None, "abc"));
        assert!(!states_match(Some(""), ""));
        assert!(!states_match(Some("abc"), "abd"));
        assert!(states_match(Some("abc"), "abc"));
    }
}
