//! Ordered decision rules
//!
//! The gate walks [`GateRule::ORDER`] and stops at the first rule that
//! produces an outcome. Each rule may assume every earlier rule declined:
//! `ChainMatch` and `AddressFormat` only ever see wallet-only credentials
//! because `SessionPriority` and `WalletPresence` ran first.
//!
//! ```text
//! SessionPriority → WalletPresence → ChainMatch → AddressFormat → WalletGrant
//! ```

use crate::decision::{AuthMethod, AuthorizationDecision, DenialReason};
use crate::inputs::GateInputs;
use passage_core::WalletAddress;
use tracing::debug;

/// One step of the decision procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateRule {
    /// Valid session wins outright, whatever the wallet says.
    SessionPriority,
    /// Without a session, a connected wallet with an address is required.
    WalletPresence,
    /// Wallet-only access on a chain-restricted route needs the target chain.
    ChainMatch,
    /// Wallet-only access needs a well-formed address.
    AddressFormat,
    /// Everything checked; the wallet is enough.
    WalletGrant,
}

/// What a rule decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Allow via the given credential.
    Grant(AuthMethod),
    /// Deny for the given reason.
    Deny(DenialReason),
}

impl GateRule {
    /// Evaluation order. Reordering changes who gets in.
    pub const ORDER: [GateRule; 5] = [
        GateRule::SessionPriority,
        GateRule::WalletPresence,
        GateRule::ChainMatch,
        GateRule::AddressFormat,
        GateRule::WalletGrant,
    ];

    /// Name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            GateRule::SessionPriority => "session_priority",
            GateRule::WalletPresence => "wallet_presence",
            GateRule::ChainMatch => "chain_match",
            GateRule::AddressFormat => "address_format",
            GateRule::WalletGrant => "wallet_grant",
        }
    }

    /// Apply this rule; `None` passes to the next one.
    pub fn apply(self, inputs: &GateInputs) -> Option<RuleOutcome> {
        match self {
            GateRule::SessionPriority => inputs
                .has_valid_session()
                .then_some(RuleOutcome::Grant(AuthMethod::WCsap)),
            GateRule::WalletPresence => (!inputs.has_wallet_credential())
                .then_some(RuleOutcome::Deny(DenialReason::NotAuthenticated)),
            GateRule::ChainMatch => (inputs.require_correct_chain
                && inputs.is_wallet_connected
                && !inputs.is_correct_chain)
                .then_some(RuleOutcome::Deny(DenialReason::WrongNetwork)),
            GateRule::AddressFormat => inputs
                .wallet_address
                .as_deref()
                .is_some_and(|address| !WalletAddress::is_well_formed(address))
                .then_some(RuleOutcome::Deny(DenialReason::InvalidWallet)),
            GateRule::WalletGrant => Some(RuleOutcome::Grant(AuthMethod::Wallet)),
        }
    }
}

/// Run the rules in order and return the first outcome with the rule that
/// produced it.
pub fn first_match(inputs: &GateInputs) -> (GateRule, RuleOutcome) {
    for rule in GateRule::ORDER {
        if let Some(outcome) = rule.apply(inputs) {
            return (rule, outcome);
        }
    }
    // WalletGrant always produces an outcome.
    (
        GateRule::WalletGrant,
        RuleOutcome::Grant(AuthMethod::Wallet),
    )
}

/// Decide whether the captured credentials may access a protected route.
///
/// Pure apart from a single diagnostic log line; the same inputs always
/// produce the same decision.
pub fn evaluate(inputs: &GateInputs) -> AuthorizationDecision {
    let (rule, outcome) = first_match(inputs);
    let decision = match outcome {
        RuleOutcome::Grant(method) => AuthorizationDecision::granted(method),
        RuleOutcome::Deny(reason) => {
            AuthorizationDecision::denied(reason, &inputs.target_chain_name)
        }
    };

    debug!(
        rule = rule.name(),
        auth_method = decision.auth_method.map(AuthMethod::as_str),
        reason = decision.reason.map(DenialReason::as_str),
        can_access = decision.can_access,
        "Route gate decision"
    );

    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use passage_core::WalletSnapshot;

    const ADDR: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

    #[test]
    fn test_order_is_fixed() {
        let names: Vec<_> = GateRule::ORDER.iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            [
                "session_priority",
                "wallet_presence",
                "chain_match",
                "address_format",
                "wallet_grant"
            ]
        );
    }

    #[test]
    fn test_chain_rule_fires_before_address_rule() {
        let inputs = GateInputs::anonymous()
            .with_wallet(WalletSnapshot::connected("0xZZZZ", false, "Sepolia"))
            .requiring_chain(true);
        assert_eq!(
            first_match(&inputs),
            (
                GateRule::ChainMatch,
                RuleOutcome::Deny(DenialReason::WrongNetwork)
            )
        );
    }

    #[test]
    fn test_wallet_grant_is_last_resort() {
        let inputs =
            GateInputs::anonymous().with_wallet(WalletSnapshot::connected(ADDR, true, "Sepolia"));
        assert_eq!(
            first_match(&inputs),
            (
                GateRule::WalletGrant,
                RuleOutcome::Grant(AuthMethod::Wallet)
            )
        );
    }

    #[test]
    fn test_connected_without_address_is_unauthenticated() {
        let inputs = GateInputs::anonymous().with_wallet(WalletSnapshot {
            is_connected: true,
            ..WalletSnapshot::default()
        });
        assert_eq!(
            GateRule::WalletPresence.apply(&inputs),
            Some(RuleOutcome::Deny(DenialReason::NotAuthenticated))
        );
    }
}
