//! # Passage Core
//!
//! Shared vocabulary for the Passage route gate: the unified error type,
//! wallet address and chain types, route paths, session credential types,
//! configuration, and the read-only source traits through which the gate
//! observes the session store and the wallet provider.

pub mod config;
pub mod errors;
pub mod session;
pub mod sources;
pub mod types;

pub use config::{GateConfig, PassageConfig, RouteRule, SessionConfig, WalletConfig};
pub use errors::{PassageError, Result};
pub use session::{SessionInfo, SessionToken};
pub use sources::{SessionSource, WalletSnapshot, WalletSource};
pub use types::{ChainId, RoutePath, TargetChain, WalletAddress};
