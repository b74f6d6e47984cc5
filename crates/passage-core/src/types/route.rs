//! Navigable route paths

use serde::{Deserialize, Serialize};

/// A navigable application path such as `/generate` or `/admin/users`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutePath(String);

impl RoutePath {
    /// Create a route path, adding a leading `/` when missing.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.starts_with('/') {
            Self(value)
        } else {
            Self(format!("/{value}"))
        }
    }

    /// The landing route unauthenticated users are sent to.
    pub fn home() -> Self {
        Self("/".to_string())
    }

    /// Get the path string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this path equals `prefix` or lies beneath it.
    ///
    /// `/app` covers `/app` and `/app/settings` but not `/apple`.
    pub fn starts_with_segment(&self, prefix: &str) -> bool {
        if prefix == "/" {
            return true;
        }
        let prefix = prefix.trim_end_matches('/');
        match self.0.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
            None => false,
        }
    }
}

impl From<&str> for RoutePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RoutePath {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
