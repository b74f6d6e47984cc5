//! Session credential types
//!
//! The token is opaque: nothing in this workspace parses or verifies it. The
//! metadata is whatever the authentication service returned at verification
//! time, cached next to the token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque bearer token issued by the session authentication service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns `true` if the token carries no characters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw token string, for building request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionToken(<{} bytes>)", self.0.len())
    }
}

impl From<&str> for SessionToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Cached session metadata returned by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Address the session was issued to
    pub wallet_address: String,
    /// Server-side session identifier, when provided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// When the session was issued
    pub issued_at: DateTime<Utc>,
    /// Advertised expiry; informational only, never enforced client-side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the service has verified the session since issuance
    #[serde(default)]
    pub verified: bool,
}

impl SessionInfo {
    /// Create metadata for a freshly issued session.
    pub fn issued(wallet_address: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            wallet_address: wallet_address.into(),
            session_id: None,
            issued_at,
            expires_at: None,
            verified: false,
        }
    }

    /// Set the server-side session identifier.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Set the advertised expiry.
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Mark the session as verified.
    pub fn verified(mut self) -> Self {
        self.verified = true;
        self
    }
}
