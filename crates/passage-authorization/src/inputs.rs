//! Gate inputs
//!
//! Everything the decision procedure looks at, captured once per evaluation
//! from the session and wallet sources.

use crate::decision::PendingState;
use passage_core::{SessionInfo, SessionSource, SessionToken, WalletSnapshot, WalletSource};
use serde::{Deserialize, Serialize};

/// Read-only snapshot of both credential sources plus the caller's chain
/// requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateInputs {
    /// Cached bearer token
    pub session_token: Option<SessionToken>,
    /// Cached session metadata
    pub session_info: Option<SessionInfo>,
    /// Address reported by the wallet, unvalidated
    pub wallet_address: Option<String>,
    /// Wallet reports an active connection
    pub is_wallet_connected: bool,
    /// Wallet is on the target chain
    pub is_correct_chain: bool,
    /// The route demands the target chain for wallet-only access
    pub require_correct_chain: bool,
    /// Expected chain name, used in `wrong_network` denials
    pub target_chain_name: String,
}

impl GateInputs {
    /// No credentials of either kind.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Capture both sources.
    pub fn from_sources<S, W>(session: &S, wallet: &W, require_correct_chain: bool) -> Self
    where
        S: SessionSource + ?Sized,
        W: WalletSource + ?Sized,
    {
        Self {
            session_token: session.token(),
            session_info: session.session_info(),
            require_correct_chain,
            ..Self::anonymous()
        }
        .with_wallet(wallet.snapshot())
    }

    /// Replace the session half.
    pub fn with_session(mut self, token: Option<SessionToken>, info: Option<SessionInfo>) -> Self {
        self.session_token = token;
        self.session_info = info;
        self
    }

    /// Replace the wallet half.
    pub fn with_wallet(mut self, wallet: WalletSnapshot) -> Self {
        self.wallet_address = wallet.address;
        self.is_wallet_connected = wallet.is_connected;
        self.is_correct_chain = wallet.is_correct_chain;
        self.target_chain_name = wallet.target_chain_name;
        self
    }

    /// Set the chain requirement.
    pub fn requiring_chain(mut self, require_correct_chain: bool) -> Self {
        self.require_correct_chain = require_correct_chain;
        self
    }

    /// A session is valid iff a non-empty token and metadata are both present.
    pub fn has_valid_session(&self) -> bool {
        self.session_token.as_ref().is_some_and(|t| !t.is_empty()) && self.session_info.is_some()
    }

    /// Wallet reports a connection and an address.
    pub fn has_wallet_credential(&self) -> bool {
        self.is_wallet_connected && self.wallet_address.is_some()
    }
}

/// Serialized view of both sources, as captured by a client for offline
/// evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateSnapshot {
    /// Cached bearer token
    pub session_token: Option<SessionToken>,
    /// Cached session metadata
    pub session_info: Option<SessionInfo>,
    /// Wallet connection
    pub wallet: WalletSnapshot,
    /// In-flight upstream work
    pub pending: PendingState,
}

impl SessionSource for GateSnapshot {
    fn token(&self) -> Option<SessionToken> {
        self.session_token.clone()
    }

    fn session_info(&self) -> Option<SessionInfo> {
        self.session_info.clone()
    }

    fn is_authenticating(&self) -> bool {
        self.pending.is_authenticating
    }

    fn is_initializing(&self) -> bool {
        self.pending.is_initializing
    }
}

impl WalletSource for GateSnapshot {
    fn snapshot(&self) -> WalletSnapshot {
        WalletSnapshot {
            is_switching: self.wallet.is_switching || self.pending.is_switching,
            ..self.wallet.clone()
        }
    }
}
