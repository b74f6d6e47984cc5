//! Wallet connection state

use passage_core::ChainId;
use serde::{Deserialize, Serialize};

/// Live wallet connection state. Ephemeral; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConnectionState {
    /// Active account as reported, unvalidated
    pub address: Option<String>,
    /// The extension reports an active connection
    pub is_connected: bool,
    /// Network the wallet is on, when connected
    pub chain_id: Option<ChainId>,
    /// `chain_id` equals the target chain
    pub is_correct_chain: bool,
    /// A chain switch request is pending
    pub is_switching: bool,
    /// Last switch failure, cleared on the next switch or chain change
    pub last_error: Option<String>,
}
