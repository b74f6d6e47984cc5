//! Events emitted by the wallet extension

use passage_core::ChainId;
use serde::{Deserialize, Serialize};

/// Something the wallet extension reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WalletEvent {
    /// The user approved a connection.
    Connected {
        /// Active account
        address: String,
        /// Network the wallet is on
        chain_id: ChainId,
    },
    /// The active account list changed. An empty list means the wallet
    /// revoked access.
    AccountsChanged {
        /// Accounts, active one first
        accounts: Vec<String>,
    },
    /// The wallet moved to another network.
    ChainChanged {
        /// New network
        chain_id: ChainId,
    },
    /// The wallet disconnected.
    Disconnected,
    /// A switch to the target chain was requested.
    SwitchRequested,
    /// The requested switch finished.
    SwitchCompleted {
        /// Network after the switch
        chain_id: ChainId,
    },
    /// The requested switch was rejected or failed.
    SwitchFailed {
        /// Reason reported by the extension
        reason: String,
    },
}

impl WalletEvent {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            WalletEvent::Connected { .. } => "connected",
            WalletEvent::AccountsChanged { .. } => "accounts_changed",
            WalletEvent::ChainChanged { .. } => "chain_changed",
            WalletEvent::Disconnected => "disconnected",
            WalletEvent::SwitchRequested => "switch_requested",
            WalletEvent::SwitchCompleted { .. } => "switch_completed",
            WalletEvent::SwitchFailed { .. } => "switch_failed",
        }
    }
}
