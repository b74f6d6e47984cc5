//! Domain types shared across Passage crates

pub mod address;
pub mod chain;
pub mod route;

pub use address::{WalletAddress, ADDRESS_BYTES};
pub use chain::{ChainId, TargetChain};
pub use route::RoutePath;
