//! Session token store
//!
//! Owns the persisted bearer token and the session metadata cached next to
//! it. A session exists only when both are present; any half-persisted state
//! found at startup is discarded.
//!
//! Every mutation of storage and cache runs under one async write lock, so a
//! token is never paired with metadata from another session.

use crate::bearer::BearerAuth;
use crate::storage::SessionStorage;
use crate::verifier::{RetryPolicy, SessionVerifier};
use parking_lot::RwLock;
use passage_core::{
    PassageError, Result, SessionConfig, SessionInfo, SessionSource, SessionToken,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// HTTP status that invalidates the cached session.
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Storage keys used for the two halves of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKeys {
    /// Key of the bearer token
    pub token: String,
    /// Key of the JSON-encoded metadata
    pub info: String,
}

impl SessionKeys {
    /// Keys from session configuration.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            token: config.token_key.clone(),
            info: config.info_key.clone(),
        }
    }
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

#[derive(Debug, Default)]
struct CachedSession {
    token: Option<SessionToken>,
    info: Option<SessionInfo>,
}

/// Resets an in-flight flag when dropped, including on cancellation.
struct FlagGuard<'a>(&'a AtomicBool);

impl<'a> FlagGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Persisted session credentials with a synchronous read cache.
pub struct SessionStore<S> {
    storage: S,
    keys: SessionKeys,
    cache: RwLock<CachedSession>,
    writes: Mutex<()>,
    bearer: BearerAuth,
    initializing: AtomicBool,
    authenticating: AtomicBool,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Create a store over `storage`. Reports `is_initializing` until
    /// [`SessionStore::initialize`] has run.
    pub fn new(storage: S) -> Self {
        Self::with_keys(storage, SessionKeys::default())
    }

    /// Create a store with explicit storage keys.
    pub fn with_keys(storage: S, keys: SessionKeys) -> Self {
        Self {
            storage,
            keys,
            cache: RwLock::new(CachedSession::default()),
            writes: Mutex::new(()),
            bearer: BearerAuth::new(),
            initializing: AtomicBool::new(true),
            authenticating: AtomicBool::new(false),
        }
    }

    /// Create a store configured from `[session]` settings.
    pub fn from_config(storage: S, config: &SessionConfig) -> Self {
        Self::with_keys(storage, SessionKeys::from_config(config))
    }

    /// Bearer handle to hand to the HTTP client.
    pub fn bearer(&self) -> BearerAuth {
        self.bearer.clone()
    }

    /// Underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns `true` if both token and metadata are cached.
    pub fn has_session(&self) -> bool {
        let cache = self.cache.read();
        cache.token.as_ref().is_some_and(|t| !t.is_empty()) && cache.info.is_some()
    }

    /// Load persisted credentials into the cache.
    pub async fn initialize(&self) -> Result<()> {
        let result = {
            let _writes = self.writes.lock().await;
            self.load_persisted().await
        };
        self.initializing.store(false, Ordering::Release);
        result
    }

    async fn load_persisted(&self) -> Result<()> {
        let token = self
            .storage
            .load(&self.keys.token)
            .await?
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .map(SessionToken::new)
            .filter(|token| !token.is_empty());

        let info = match self.storage.load(&self.keys.info).await? {
            Some(bytes) => match serde_json::from_slice::<SessionInfo>(&bytes) {
                Ok(info) => Some(info),
                Err(e) => {
                    warn!(error = %e, "Discarding undecodable session metadata");
                    None
                }
            },
            None => None,
        };

        match (token, info) {
            (Some(token), Some(info)) => {
                debug!(wallet = %info.wallet_address, "Restored persisted session");
                self.bearer.set(token.clone());
                let mut cache = self.cache.write();
                cache.token = Some(token);
                cache.info = Some(info);
                Ok(())
            }
            (None, None) => {
                debug!("No persisted session");
                Ok(())
            }
            (token, info) => {
                warn!(
                    has_token = token.is_some(),
                    has_info = info.is_some(),
                    "Persisted session is incomplete, clearing it"
                );
                self.clear_persisted().await
            }
        }
    }

    /// Record a session issued by the authentication service.
    ///
    /// If the metadata cannot be persisted the previous token is put back, so
    /// storage never pairs the new token with the old metadata.
    pub async fn establish(&self, token: SessionToken, info: SessionInfo) -> Result<()> {
        if token.is_empty() {
            return Err(PassageError::invalid("session token must not be empty"));
        }

        let encoded = serde_json::to_vec(&info)?;
        let _writes = self.writes.lock().await;
        self.storage
            .save(&self.keys.token, token.expose().as_bytes().to_vec())
            .await?;
        if let Err(e) = self.storage.save(&self.keys.info, encoded).await {
            warn!(error = %e, "Failed to persist session metadata, restoring previous token");
            self.restore_persisted_token().await;
            return Err(e);
        }

        info!(wallet = %info.wallet_address, "Session established");
        self.bearer.set(token.clone());
        let mut cache = self.cache.write();
        cache.token = Some(token);
        cache.info = Some(info);
        Ok(())
    }

    /// Put the cached token back under the token key, or remove the key when
    /// no session is cached. Falls back to dropping the whole session.
    async fn restore_persisted_token(&self) {
        let previous = self.cache.read().token.clone();
        let restored = match previous {
            Some(token) => {
                self.storage
                    .save(&self.keys.token, token.expose().as_bytes().to_vec())
                    .await
            }
            None => self.storage.remove(&self.keys.token).await.map(|_| ()),
        };
        if let Err(e) = restored {
            warn!(error = %e, "Token rollback failed, dropping session");
            if let Err(e) = self.clear_session().await {
                warn!(error = %e, "Failed to clear persisted session");
            }
        }
    }

    /// Drop the session: cache, bearer header and persisted values.
    ///
    /// Safe to call with no session present.
    pub async fn logout(&self) -> Result<()> {
        let _writes = self.writes.lock().await;
        self.clear_session().await
    }

    async fn clear_session(&self) -> Result<()> {
        let had_session = {
            let mut cache = self.cache.write();
            cache.token.take().is_some() | cache.info.take().is_some()
        };
        self.bearer.revoke();
        if had_session {
            info!("Session cleared");
        }
        self.clear_persisted().await
    }

    async fn clear_persisted(&self) -> Result<()> {
        let token_result = self.storage.remove(&self.keys.token).await;
        let info_result = self.storage.remove(&self.keys.info).await;
        token_result?;
        info_result?;
        Ok(())
    }

    /// React to an HTTP response status from an authenticated call.
    ///
    /// A 401 invalidates the session. Returns `true` if a cached session was
    /// dropped.
    pub async fn handle_status(&self, status: u16) -> Result<bool> {
        if status != STATUS_UNAUTHORIZED {
            return Ok(false);
        }
        let had_session = self.has_session();
        warn!(had_session, "Authentication service returned 401");
        self.logout().await?;
        Ok(had_session)
    }

    /// Re-verify the cached token and refresh its metadata.
    ///
    /// Transport failures are retried per `policy`; a rejection logs out.
    pub async fn verify<V>(&self, verifier: &V, policy: RetryPolicy) -> Result<SessionInfo>
    where
        V: SessionVerifier + ?Sized,
    {
        let token = self
            .token()
            .ok_or_else(|| PassageError::unauthorized("no session token to verify"))?;
        let _guard = FlagGuard::raise(&self.authenticating);

        let max_attempts = policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match verifier.verify(&token).await {
                Ok(info) => {
                    let _writes = self.writes.lock().await;
                    self.ensure_current(&token)?;
                    self.storage
                        .save(&self.keys.info, serde_json::to_vec(&info)?)
                        .await?;
                    debug!(attempt, wallet = %info.wallet_address, "Session verified");
                    self.cache.write().info = Some(info.clone());
                    return Ok(info);
                }
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    warn!(attempt, max_attempts, error = %e, "Session verification failed, retrying");
                    attempt += 1;
                    tokio::time::sleep(policy.backoff).await;
                }
                Err(e @ PassageError::Unauthorized { .. }) => {
                    warn!(error = %e, "Session rejected by authentication service");
                    let _writes = self.writes.lock().await;
                    if self.ensure_current(&token).is_ok() {
                        self.clear_session().await?;
                    }
                    return Err(e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Fails when the cached token is no longer `verified`, i.e. the session
    /// was replaced or cleared while the verifier was running.
    fn ensure_current(&self, verified: &SessionToken) -> Result<()> {
        if self.cache.read().token.as_ref() == Some(verified) {
            Ok(())
        } else {
            debug!("Session changed during verification, discarding result");
            Err(PassageError::invalid(
                "session was replaced or cleared during verification",
            ))
        }
    }
}

impl<S> SessionSource for SessionStore<S> {
    fn token(&self) -> Option<SessionToken> {
        self.cache.read().token.clone()
    }

    fn session_info(&self) -> Option<SessionInfo> {
        self.cache.read().info.clone()
    }

    fn is_authenticating(&self) -> bool {
        self.authenticating.load(Ordering::Acquire)
    }

    fn is_initializing(&self) -> bool {
        self.initializing.load(Ordering::Acquire)
    }
}

impl<S> std::fmt::Debug for SessionStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache = self.cache.read();
        f.debug_struct("SessionStore")
            .field("keys", &self.keys)
            .field("token", &cache.token)
            .field("has_info", &cache.info.is_some())
            .finish_non_exhaustive()
    }
}
