//! Bearer credential shared with the HTTP client
//!
//! The HTTP client holds a clone of [`BearerAuth`] and reads the header on
//! every request. The session store installs the token on establish and
//! revokes it on logout, so both sides always agree.

use parking_lot::RwLock;
use passage_core::SessionToken;
use std::sync::Arc;

/// Name of the request header carrying the credential.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Shared, revocable bearer credential.
#[derive(Debug, Clone, Default)]
pub struct BearerAuth {
    token: Arc<RwLock<Option<SessionToken>>>,
}

impl BearerAuth {
    /// Create a handle with no credential installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a token for subsequent requests.
    pub fn set(&self, token: SessionToken) {
        *self.token.write() = Some(token);
    }

    /// Remove the installed token. Returns `true` if one was present.
    pub fn revoke(&self) -> bool {
        self.token.write().take().is_some()
    }

    /// Returns `true` if a token is installed.
    pub fn is_set(&self) -> bool {
        self.token.read().is_some()
    }

    /// Value for the `Authorization` header, e.g. `Bearer abc`.
    pub fn header_value(&self) -> Option<String> {
        self.token
            .read()
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_observe_revocation() {
        let store_side = BearerAuth::new();
        let client_side = store_side.clone();
        assert_eq!(client_side.header_value(), None);

        store_side.set(SessionToken::new("abc"));
        assert_eq!(client_side.header_value().as_deref(), Some("Bearer abc"));

        assert!(store_side.revoke());
        assert!(!client_side.is_set());
        assert!(!store_side.revoke());
    }
}
