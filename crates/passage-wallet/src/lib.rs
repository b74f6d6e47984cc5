//! # Passage Wallet
//!
//! Wallet connection provider. Tracks connection status, active address and
//! whether the wallet is on the target chain, driven entirely by events from
//! the wallet extension. Performs no RPC; address validation is left to the
//! route gate.

pub mod connection;
pub mod events;
pub mod state;

pub use connection::WalletConnection;
pub use events::WalletEvent;
pub use state::WalletConnectionState;
