//! Session verification boundary
//!
//! Verification (signature, expiry, revocation) belongs to the external
//! authentication service. The store only calls it, retries transport
//! failures, and caches what comes back.

use async_trait::async_trait;
use passage_core::{Result, SessionConfig, SessionInfo, SessionToken};
use std::time::Duration;

/// External service that checks a token and returns fresh metadata.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Verify `token`.
    ///
    /// Implementations return `PassageError::Unauthorized` when the service
    /// rejects the token and `PassageError::Network` for transport failures.
    async fn verify(&self, token: &SessionToken) -> Result<SessionInfo>;
}

/// Bounded retry schedule for verification calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Build from session configuration.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            max_attempts: config.verify_max_attempts.max(1),
            backoff: Duration::from_millis(config.verify_backoff_ms),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}
