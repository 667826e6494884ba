//! Bearer-token session handling.
//!
//! The token is the only piece of client state that survives a page
//! reload. It is loaded once at startup and then threaded explicitly into
//! the [`ApiClient`](crate::services::api::ApiClient); nothing else reads
//! browser storage directly.

use gloo::storage::{LocalStorage, Storage};

const TOKEN_STORAGE_KEY: &str = "token";

/// The current authentication state, injected into every API client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthSession {
    token: Option<String>,
}

impl AuthSession {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Session from whatever token a previous visit left in local storage
    pub fn restore() -> Self {
        Self {
            token: LocalStorage::get(TOKEN_STORAGE_KEY).ok(),
        }
    }

    /// Writes the session through to local storage (or clears it when the
    /// session is anonymous).
    pub fn persist(&self) {
        match &self.token {
            Some(token) => {
                let _ = LocalStorage::set(TOKEN_STORAGE_KEY, token);
            }
            None => LocalStorage::delete(TOKEN_STORAGE_KEY),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Value for the `Authorization` header, when a token is present
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {}", token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_session_sends_no_header() {
        let session = AuthSession::anonymous();
        assert!(!session.is_authenticated());
        assert_eq!(session.bearer(), None);
    }

    #[test]
    fn test_bearer_header_format() {
        let session = AuthSession::with_token("abc123");
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("abc123"));
        assert_eq!(session.bearer(), Some("Bearer abc123".to_string()));
    }
}
