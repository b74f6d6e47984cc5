//! # Passage Authorization
//!
//! Dual-credential route gate. Combines a W-CSAP session (token plus cached
//! metadata) and a wallet connection into one allow/deny decision per
//! navigation:
//!
//! 1. a valid session grants access, regardless of wallet state;
//! 2. otherwise a connected wallet with an address is required;
//! 3. chain-restricted routes need the wallet on the target chain;
//! 4. the wallet address must be `0x` + 40 hex digits.
//!
//! Decisions are recomputed from read-only snapshots on every evaluation and
//! never stored. Token expiry and revocation are enforced server-side; the
//! gate does not second-guess a cached session.

pub mod decision;
pub mod gate;
pub mod inputs;
pub mod routes;
pub mod rules;

pub use decision::{
    AuthMethod, AuthorizationDecision, DenialReason, PendingState, Redirect, RouteOutcome,
};
pub use gate::RouteGate;
pub use inputs::{GateInputs, GateSnapshot};
pub use routes::{RouteProtection, RouteTable};
pub use rules::{evaluate, GateRule, RuleOutcome};
