//! Session store diagnostics against the file-backed storage

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use passage_core::{PassageConfig, SessionInfo, SessionSource, SessionToken};
use passage_session::{FileSessionStorage, SessionStore};
use serde::Serialize;
use std::path::PathBuf;

/// Session store operations
#[derive(Debug, Clone, Subcommand)]
pub enum SessionCommand {
    /// Show the persisted session, without the token
    Show,
    /// Persist a session issued by the authentication service
    Establish {
        /// Bearer token
        #[arg(long)]
        token: String,
        /// JSON file with the session metadata
        #[arg(long)]
        info: PathBuf,
    },
    /// Clear the persisted session
    Logout,
}

/// What the store holds after the command ran. The token itself is never
/// reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    /// Token and metadata are both present
    pub has_session: bool,
    /// Bearer header would be sent
    pub bearer_installed: bool,
    /// Address the session was issued to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    /// Server-side session identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Issue time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
    /// Advertised expiry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Verified since issuance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl SessionReport {
    fn from_store(store: &SessionStore<FileSessionStorage>) -> Self {
        let info = store.session_info();
        Self {
            has_session: store.has_session(),
            bearer_installed: store.bearer().is_set(),
            wallet_address: info.as_ref().map(|i| i.wallet_address.clone()),
            session_id: info.as_ref().and_then(|i| i.session_id.clone()),
            issued_at: info.as_ref().map(|i| i.issued_at),
            expires_at: info.as_ref().and_then(|i| i.expires_at),
            verified: info.as_ref().map(|i| i.verified),
        }
    }
}

/// Run a session command.
pub async fn run(config: &PassageConfig, command: &SessionCommand) -> Result<SessionReport> {
    let storage = FileSessionStorage::new(config.session.storage_dir.clone());
    let store = SessionStore::from_config(storage, &config.session);
    store
        .initialize()
        .await
        .context("failed to load persisted session")?;

    match command {
        SessionCommand::Show => {}
        SessionCommand::Establish {
            token,
            info: info_path,
        } => {
            let content = tokio::fs::read_to_string(info_path)
                .await
                .with_context(|| format!("failed to read {}", info_path.display()))?;
            let info: SessionInfo = serde_json::from_str(&content).with_context(|| {
                format!("invalid session metadata in {}", info_path.display())
            })?;
            store
                .establish(SessionToken::new(token.clone()), info)
                .await
                .context("failed to persist session")?;
        }
        SessionCommand::Logout => {
            store.logout().await.context("failed to clear session")?;
        }
    }

    Ok(SessionReport::from_store(&store))
}
