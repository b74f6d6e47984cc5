//! Chain identifiers

use serde::{Deserialize, Serialize};

/// Numeric network identifier reported by the wallet extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    /// Ethereum mainnet.
    pub const MAINNET: ChainId = ChainId(1);
    /// Sepolia testnet.
    pub const SEPOLIA: ChainId = ChainId(11_155_111);

    /// Get the raw identifier.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for ChainId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The network a wallet must be connected to for wallet-only access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetChain {
    /// Expected chain identifier
    pub id: ChainId,
    /// Human-readable network name shown in denial messages
    pub name: String,
}

impl TargetChain {
    /// Create a target chain.
    pub fn new(id: impl Into<ChainId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Returns `true` if `chain_id` is this target.
    pub fn matches(&self, chain_id: ChainId) -> bool {
        self.id == chain_id
    }
}

impl Default for TargetChain {
    fn default() -> Self {
        Self::new(ChainId::MAINNET, "Ethereum Mainnet")
    }
}
