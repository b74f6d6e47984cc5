//! Authorization decision vocabulary
//!
//! Denials are values, not errors: every one of them is a state the user can
//! fix (connect, switch network, reconnect) and is surfaced as a redirect.

use passage_core::RoutePath;
use serde::{Deserialize, Serialize};

/// Which credential granted access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthMethod {
    /// Session token plus cached metadata.
    #[serde(rename = "W-CSAP")]
    WCsap,
    /// Connected wallet alone.
    #[serde(rename = "Wallet")]
    Wallet,
}

impl AuthMethod {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            AuthMethod::WCsap => "W-CSAP",
            AuthMethod::Wallet => "Wallet",
        }
    }
}

impl std::fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why navigation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// Neither a session nor a connected wallet.
    NotAuthenticated,
    /// Wallet-only access on a chain other than the target.
    WrongNetwork,
    /// Wallet-only access with a malformed address.
    InvalidWallet,
}

impl DenialReason {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            DenialReason::NotAuthenticated => "not_authenticated",
            DenialReason::WrongNetwork => "wrong_network",
            DenialReason::InvalidWallet => "invalid_wallet",
        }
    }

    /// User-facing explanation.
    pub fn message(self, target_chain: &str) -> String {
        match self {
            DenialReason::NotAuthenticated => {
                "Please connect your wallet to access this page".to_string()
            }
            DenialReason::WrongNetwork => {
                format!("Please switch to {target_chain} to access this page")
            }
            DenialReason::InvalidWallet => {
                "Invalid wallet address. Please reconnect your wallet".to_string()
            }
        }
    }

    /// Whether a wallet credential was present despite the denial.
    pub fn credential_present(self) -> bool {
        matches!(self, DenialReason::WrongNetwork)
    }
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one gate evaluation. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationDecision {
    /// A usable credential was found
    pub authenticated: bool,
    /// Denial reason; `None` when access is granted
    pub reason: Option<DenialReason>,
    /// Human-readable summary
    pub message: String,
    /// Navigation may proceed
    pub can_access: bool,
    /// Credential that authenticated the user, if any
    pub auth_method: Option<AuthMethod>,
    /// Expected chain name, set for `wrong_network`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_chain: Option<String>,
}

impl AuthorizationDecision {
    /// Access granted via `method`.
    pub fn granted(method: AuthMethod) -> Self {
        let message = match method {
            AuthMethod::WCsap => "Authenticated via W-CSAP session",
            AuthMethod::Wallet => "Authenticated via wallet connection",
        };
        Self {
            authenticated: true,
            reason: None,
            message: message.to_string(),
            can_access: true,
            auth_method: Some(method),
            target_chain: None,
        }
    }

    /// Access denied for `reason`.
    pub fn denied(reason: DenialReason, target_chain: &str) -> Self {
        let authenticated = reason.credential_present();
        Self {
            authenticated,
            reason: Some(reason),
            message: reason.message(target_chain),
            can_access: false,
            auth_method: authenticated.then_some(AuthMethod::Wallet),
            target_chain: (reason == DenialReason::WrongNetwork)
                .then(|| target_chain.to_string()),
        }
    }

    /// Redirect payload for a denied decision; `None` when granted.
    pub fn redirect(&self, to: RoutePath, from: RoutePath) -> Option<Redirect> {
        self.reason.map(|reason| Redirect {
            to,
            from,
            reason,
            message: self.message.clone(),
            target_chain: self.target_chain.clone(),
        })
    }
}

/// Router state carried by a denial. `from` must survive the redirect so the
/// user lands back on their original destination after authenticating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    /// Redirect target
    pub to: RoutePath,
    /// Originally requested path
    pub from: RoutePath,
    /// Denial reason
    pub reason: DenialReason,
    /// User-facing message
    pub message: String,
    /// Expected chain name for `wrong_network`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_chain: Option<String>,
}

/// Upstream asynchronous work that must finish before a decision is made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingState {
    /// Session verification in flight
    pub is_authenticating: bool,
    /// Persisted session not yet loaded
    pub is_initializing: bool,
    /// Wallet chain switch in flight
    pub is_switching: bool,
}

impl PendingState {
    /// Nothing in flight.
    pub fn settled() -> Self {
        Self::default()
    }

    /// Returns `true` if anything is still in flight.
    pub fn is_pending(&self) -> bool {
        self.is_authenticating || self.is_initializing || self.is_switching
    }
}

/// What a protected route should do right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// Upstream state is in flight; show a loading indicator.
    Loading,
    /// Render the route. `auth_method` is `None` for public routes.
    Render {
        /// Credential that granted access
        auth_method: Option<AuthMethod>,
    },
    /// Navigate away.
    Redirect(Redirect),
}

impl RouteOutcome {
    /// Redirect payload, if redirecting.
    pub fn as_redirect(&self) -> Option<&Redirect> {
        match self {
            RouteOutcome::Redirect(redirect) => Some(redirect),
            _ => None,
        }
    }
}
