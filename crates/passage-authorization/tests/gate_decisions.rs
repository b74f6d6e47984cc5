//! Route gate scenarios over live wallet state

use chrono::{TimeZone, Utc};
use passage_authorization::{
    AuthMethod, DenialReason, GateInputs, GateSnapshot, PendingState, RouteGate, RouteOutcome,
    RouteProtection, RouteTable,
};
use passage_core::{
    ChainId, PassageConfig, RoutePath, SessionInfo, SessionSource, SessionToken, TargetChain,
    WalletSnapshot,
};
use passage_wallet::{WalletConnection, WalletEvent};

const ADDR: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

fn info() -> SessionInfo {
    SessionInfo::issued(ADDR, Utc.with_ymd_and_hms(2026, 5, 1, 9, 30, 0).unwrap())
}

/// Session source with fixed contents.
#[derive(Default)]
struct FixedSession {
    token: Option<SessionToken>,
    info: Option<SessionInfo>,
    initializing: bool,
    authenticating: bool,
}

impl FixedSession {
    fn valid() -> Self {
        Self {
            token: Some(SessionToken::new("tok")),
            info: Some(info()),
            ..Self::default()
        }
    }
}

impl SessionSource for FixedSession {
    fn token(&self) -> Option<SessionToken> {
        self.token.clone()
    }

    fn session_info(&self) -> Option<SessionInfo> {
        self.info.clone()
    }

    fn is_authenticating(&self) -> bool {
        self.authenticating
    }

    fn is_initializing(&self) -> bool {
        self.initializing
    }
}

fn sepolia_wallet() -> WalletConnection {
    WalletConnection::new(TargetChain::new(ChainId::SEPOLIA, "Sepolia"))
}

fn connect(wallet: &mut WalletConnection, address: &str, chain_id: ChainId) {
    wallet.apply(WalletEvent::Connected {
        address: address.to_string(),
        chain_id,
    });
}

#[test]
fn test_session_grants_even_with_wallet_on_wrong_chain() {
    let gate = RouteGate::default();
    let mut wallet = sepolia_wallet();
    connect(&mut wallet, ADDR, ChainId::MAINNET);

    let decision = gate.check(&FixedSession::valid(), &wallet, true);
    assert!(decision.can_access);
    assert_eq!(decision.auth_method, Some(AuthMethod::WCsap));
}

#[test]
fn test_session_grants_with_wallet_disconnected() {
    let gate = RouteGate::default();
    let decision = gate.check(&FixedSession::valid(), &sepolia_wallet(), true);
    assert_eq!(decision.auth_method, Some(AuthMethod::WCsap));
}

#[test]
fn test_token_without_metadata_is_not_a_session() {
    let gate = RouteGate::default();
    let session = FixedSession {
        token: Some(SessionToken::new("tok")),
        ..FixedSession::default()
    };
    let decision = gate.check(&session, &sepolia_wallet(), false);
    assert_eq!(decision.reason, Some(DenialReason::NotAuthenticated));
}

#[test]
fn test_empty_token_is_not_a_session() {
    let gate = RouteGate::default();
    let session = FixedSession {
        token: Some(SessionToken::new("")),
        info: Some(info()),
        ..FixedSession::default()
    };
    let decision = gate.check(&session, &sepolia_wallet(), false);
    assert_eq!(decision.reason, Some(DenialReason::NotAuthenticated));
}

#[test]
fn test_wallet_on_target_chain_grants() {
    let gate = RouteGate::default();
    let mut wallet = sepolia_wallet();
    connect(&mut wallet, ADDR, ChainId::SEPOLIA);

    let decision = gate.check(&FixedSession::default(), &wallet, true);
    assert!(decision.can_access);
    assert_eq!(decision.auth_method, Some(AuthMethod::Wallet));
}

#[test]
fn test_wallet_on_wrong_chain_only_matters_when_required() {
    let gate = RouteGate::default();
    let mut wallet = sepolia_wallet();
    connect(&mut wallet, ADDR, ChainId::MAINNET);

    let relaxed = gate.check(&FixedSession::default(), &wallet, false);
    assert_eq!(relaxed.auth_method, Some(AuthMethod::Wallet));
    assert!(relaxed.can_access);

    let strict = gate.check(&FixedSession::default(), &wallet, true);
    assert_eq!(strict.reason, Some(DenialReason::WrongNetwork));
    assert_eq!(strict.target_chain.as_deref(), Some("Sepolia"));
    assert!(strict.authenticated);
    assert!(!strict.can_access);
}

#[test]
fn test_malformed_address_is_invalid_wallet() {
    let gate = RouteGate::default();
    let mut wallet = sepolia_wallet();
    connect(&mut wallet, "0xZZZZ", ChainId::SEPOLIA);

    for require in [false, true] {
        let decision = gate.check(&FixedSession::default(), &wallet, require);
        assert_eq!(decision.reason, Some(DenialReason::InvalidWallet));
        assert!(!decision.can_access);
    }
}

#[test]
fn test_disconnect_mid_session_flips_to_denied() {
    let gate = RouteGate::default();
    let route = RoutePath::new("/generate");
    let mut wallet = sepolia_wallet();
    connect(&mut wallet, ADDR, ChainId::SEPOLIA);
    let session = FixedSession::default();

    let before = gate.guard(&route, &session, &wallet, false);
    assert_eq!(
        before,
        RouteOutcome::Render {
            auth_method: Some(AuthMethod::Wallet)
        }
    );

    wallet.apply(WalletEvent::Disconnected);
    let after = gate.guard(&route, &session, &wallet, false);
    let redirect = after.as_redirect().expect("redirect after disconnect");
    assert_eq!(redirect.reason, DenialReason::NotAuthenticated);
    assert_eq!(redirect.from, route);
    assert_eq!(redirect.to, RoutePath::home());
    assert_eq!(
        redirect.message,
        "Please connect your wallet to access this page"
    );
}

#[test]
fn test_pending_upstream_state_shows_loading() {
    let gate = RouteGate::default();
    let route = RoutePath::new("/chat");

    let initializing = FixedSession {
        initializing: true,
        ..FixedSession::valid()
    };
    assert_eq!(
        gate.guard(&route, &initializing, &sepolia_wallet(), false),
        RouteOutcome::Loading
    );

    let authenticating = FixedSession {
        authenticating: true,
        ..FixedSession::default()
    };
    assert_eq!(
        gate.guard(&route, &authenticating, &sepolia_wallet(), false),
        RouteOutcome::Loading
    );

    let mut switching = sepolia_wallet();
    connect(&mut switching, ADDR, ChainId::MAINNET);
    switching.apply(WalletEvent::SwitchRequested);
    assert_eq!(
        gate.guard(&route, &FixedSession::default(), &switching, true),
        RouteOutcome::Loading
    );
}

#[test]
fn test_redirect_uses_configured_home() {
    let gate = RouteGate::new(RoutePath::new("/welcome"));
    let outcome = gate.protect(
        &RoutePath::new("/analytics"),
        &GateInputs::anonymous(),
        PendingState::settled(),
    );
    assert_eq!(
        outcome.as_redirect().map(|r| r.to.as_str()),
        Some("/welcome")
    );
}

#[test]
fn test_navigate_respects_route_table() {
    let table = RouteTable::new()
        .with_route("/generate", RouteProtection::Protected {
            require_correct_chain: true,
        })
        .with_route("/docs", RouteProtection::Public);
    let gate = RouteGate::default().with_routes(table);
    let session = FixedSession::default();
    let wallet = sepolia_wallet();

    assert_eq!(
        gate.navigate(&RoutePath::new("/docs/intro"), &session, &wallet),
        RouteOutcome::Render { auth_method: None }
    );
    assert_eq!(
        gate.navigate(&RoutePath::home(), &session, &wallet),
        RouteOutcome::Render { auth_method: None }
    );
    assert!(gate
        .navigate(&RoutePath::new("/generate/new"), &session, &wallet)
        .as_redirect()
        .is_some());
}

#[test]
fn test_gate_from_config() {
    let config = PassageConfig::from_toml_str(
        r#"
        [gate]
        home_route = "/connect"
        require_correct_chain = true

        [[routes]]
        prefix = "/admin"
        "#,
    )
    .unwrap();
    let gate = RouteGate::from_config(&config);

    let mut wallet = sepolia_wallet();
    connect(&mut wallet, ADDR, ChainId::MAINNET);
    let outcome = gate.navigate(&RoutePath::new("/admin"), &FixedSession::default(), &wallet);
    let redirect = outcome.as_redirect().unwrap();
    assert_eq!(redirect.reason, DenialReason::WrongNetwork);
    assert_eq!(redirect.to.as_str(), "/connect");
    assert_eq!(redirect.target_chain.as_deref(), Some("Sepolia"));
}

#[test]
fn test_snapshot_file_evaluation() {
    let snapshot: GateSnapshot = serde_json::from_str(&format!(
        r#"{{
            "wallet": {{
                "address": "{ADDR}",
                "is_connected": true,
                "is_correct_chain": false,
                "target_chain_name": "Sepolia"
            }}
        }}"#
    ))
    .unwrap();

    let gate = RouteGate::default();
    let decision = gate.check(&snapshot, &snapshot, true);
    assert_eq!(decision.reason, Some(DenialReason::WrongNetwork));

    let pending: GateSnapshot =
        serde_json::from_str(r#"{"pending": {"is_initializing": true}}"#).unwrap();
    assert_eq!(
        gate.guard(&RoutePath::new("/x"), &pending, &pending, false),
        RouteOutcome::Loading
    );
}

#[test]
fn test_inputs_capture_wallet_snapshot() {
    let inputs = GateInputs::anonymous()
        .with_wallet(WalletSnapshot::connected(ADDR, true, "Sepolia"))
        .requiring_chain(true);
    assert!(inputs.has_wallet_credential());
    assert!(!inputs.has_valid_session());
    assert_eq!(inputs.target_chain_name, "Sepolia");
}
