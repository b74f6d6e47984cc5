//! Read-only credential sources consumed by the route gate
//!
//! The session store and the wallet provider own mutable, environment-bound
//! state. The gate only ever sees them through these traits, so decision
//! logic can be exercised without a browser, storage or wallet extension.

use crate::session::{SessionInfo, SessionToken};
use serde::{Deserialize, Serialize};

/// Session credentials as currently cached by the token store.
pub trait SessionSource {
    /// Current bearer token, if one is cached.
    fn token(&self) -> Option<SessionToken>;

    /// Current session metadata, if cached.
    fn session_info(&self) -> Option<SessionInfo>;

    /// A verification round-trip is in flight.
    fn is_authenticating(&self) -> bool {
        false
    }

    /// Persisted credentials have not been loaded yet.
    fn is_initializing(&self) -> bool {
        false
    }
}

/// Wallet connection state as reported by the wallet provider.
pub trait WalletSource {
    /// Take a point-in-time snapshot of the connection.
    fn snapshot(&self) -> WalletSnapshot;
}

/// Point-in-time view of the wallet connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    /// Address reported by the extension, unvalidated
    #[serde(default)]
    pub address: Option<String>,
    /// The extension reports an active connection
    #[serde(default)]
    pub is_connected: bool,
    /// Connected to the target chain
    #[serde(default)]
    pub is_correct_chain: bool,
    /// A chain switch request is pending
    #[serde(default)]
    pub is_switching: bool,
    /// Name of the expected chain
    #[serde(default)]
    pub target_chain_name: String,
}

impl WalletSnapshot {
    /// Snapshot of a wallet that is not connected.
    pub fn disconnected(target_chain_name: impl Into<String>) -> Self {
        Self {
            target_chain_name: target_chain_name.into(),
            ..Self::default()
        }
    }

    /// Snapshot of a connected wallet.
    pub fn connected(
        address: impl Into<String>,
        is_correct_chain: bool,
        target_chain_name: impl Into<String>,
    ) -> Self {
        Self {
            address: Some(address.into()),
            is_connected: true,
            is_correct_chain,
            is_switching: false,
            target_chain_name: target_chain_name.into(),
        }
    }
}

impl<T: SessionSource + ?Sized> SessionSource for &T {
    fn token(&self) -> Option<SessionToken> {
        (**self).token()
    }

    fn session_info(&self) -> Option<SessionInfo> {
        (**self).session_info()
    }

    fn is_authenticating(&self) -> bool {
        (**self).is_authenticating()
    }

    fn is_initializing(&self) -> bool {
        (**self).is_initializing()
    }
}

impl<T: WalletSource + ?Sized> WalletSource for &T {
    fn snapshot(&self) -> WalletSnapshot {
        (**self).snapshot()
    }
}

impl WalletSource for WalletSnapshot {
    fn snapshot(&self) -> WalletSnapshot {
        self.clone()
    }
}
