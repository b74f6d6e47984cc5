//! CLI command handlers over temporary files

use passage_authorization::{AuthMethod, DenialReason, RouteOutcome};
use passage_cli::commands::{evaluate, session, EvaluateArgs, SessionCommand};
use passage_core::{PassageConfig, RouteRule};
use std::path::{Path, PathBuf};

const ADDR: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn args(snapshot: PathBuf, route: &str) -> EvaluateArgs {
    EvaluateArgs {
        snapshot,
        route: route.to_string(),
        wallet_events: None,
        protected: false,
        require_correct_chain: false,
    }
}

fn config_with_storage(dir: &Path) -> PassageConfig {
    let mut config = PassageConfig::default();
    config.session.storage_dir = dir.join("session");
    config.wallet.target_chain_id = 11_155_111;
    config.wallet.target_chain_name = "Sepolia".to_string();
    config.routes.push(RouteRule {
        prefix: "/generate".to_string(),
        protected: true,
        require_correct_chain: Some(true),
    });
    config
}

#[tokio::test]
async fn test_evaluate_public_route_renders() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write(dir.path(), "snap.json", "{}");
    let outcome = evaluate::run(&config_with_storage(dir.path()), &args(snapshot, "/docs"))
        .await
        .unwrap();
    assert_eq!(outcome, RouteOutcome::Render { auth_method: None });
}

#[tokio::test]
async fn test_evaluate_protected_route_redirects_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write(dir.path(), "snap.json", "{}");
    let outcome = evaluate::run(
        &config_with_storage(dir.path()),
        &args(snapshot, "/generate"),
    )
    .await
    .unwrap();
    let redirect = outcome.as_redirect().unwrap();
    assert_eq!(redirect.reason, DenialReason::NotAuthenticated);
    assert_eq!(redirect.from.as_str(), "/generate");
}

#[tokio::test]
async fn test_evaluate_session_snapshot_grants() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write(
        dir.path(),
        "snap.json",
        &format!(
            r#"{{
                "session_token": "tok",
                "session_info": {{
                    "wallet_address": "{ADDR}",
                    "issued_at": "2026-04-01T00:00:00Z"
                }}
            }}"#
        ),
    );
    let outcome = evaluate::run(
        &config_with_storage(dir.path()),
        &args(snapshot, "/generate"),
    )
    .await
    .unwrap();
    assert_eq!(
        outcome,
        RouteOutcome::Render {
            auth_method: Some(AuthMethod::WCsap)
        }
    );
}

#[tokio::test]
async fn test_evaluate_replays_wallet_events() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write(dir.path(), "snap.json", "{}");
    let events = write(
        dir.path(),
        "events.json",
        &format!(
            r#"[
                {{"type": "connected", "address": "{ADDR}", "chain_id": 1}},
                {{"type": "switch_requested"}},
                {{"type": "switch_completed", "chain_id": 11155111}}
            ]"#
        ),
    );

    let mut evaluate_args = args(snapshot, "/generate");
    evaluate_args.wallet_events = Some(events);
    let outcome = evaluate::run(&config_with_storage(dir.path()), &evaluate_args)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        RouteOutcome::Render {
            auth_method: Some(AuthMethod::Wallet)
        }
    );
}

#[tokio::test]
async fn test_evaluate_forced_chain_requirement() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write(
        dir.path(),
        "snap.json",
        &format!(
            r#"{{"wallet": {{"address": "{ADDR}", "is_connected": true, "target_chain_name": "Sepolia"}}}}"#
        ),
    );

    let mut evaluate_args = args(snapshot, "/docs");
    evaluate_args.require_correct_chain = true;
    let outcome = evaluate::run(&config_with_storage(dir.path()), &evaluate_args)
        .await
        .unwrap();
    assert_eq!(
        outcome.as_redirect().map(|r| r.reason),
        Some(DenialReason::WrongNetwork)
    );
}

#[tokio::test]
async fn test_evaluate_missing_snapshot_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = evaluate::run(
        &config_with_storage(dir.path()),
        &args(dir.path().join("absent.json"), "/"),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_session_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_storage(dir.path());

    let empty = session::run(&config, &SessionCommand::Show).await.unwrap();
    assert!(!empty.has_session);
    assert!(!empty.bearer_installed);

    let info = write(
        dir.path(),
        "info.json",
        &format!(
            r#"{{"wallet_address": "{ADDR}", "session_id": "s-9", "issued_at": "2026-04-01T00:00:00Z", "verified": true}}"#
        ),
    );
    let established = session::run(
        &config,
        &SessionCommand::Establish {
            token: "secret-token".to_string(),
            info,
        },
    )
    .await
    .unwrap();
    assert!(established.has_session);
    assert!(established.bearer_installed);
    assert_eq!(established.session_id.as_deref(), Some("s-9"));

    let shown = session::run(&config, &SessionCommand::Show).await.unwrap();
    assert_eq!(shown, established);
    let rendered = serde_json::to_string(&shown).unwrap();
    assert!(!rendered.contains("secret-token"));

    let cleared = session::run(&config, &SessionCommand::Logout).await.unwrap();
    assert!(!cleared.has_session);
    assert_eq!(cleared.wallet_address, None);
}

#[tokio::test]
async fn test_protected_flag_keeps_table_chain_requirement() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write(
        dir.path(),
        "snap.json",
        &format!(
            r#"{{"wallet": {{"address": "{ADDR}", "is_connected": true, "target_chain_name": "Sepolia"}}}}"#
        ),
    );

    let mut evaluate_args = args(snapshot, "/generate");
    evaluate_args.protected = true;
    let outcome = evaluate::run(&config_with_storage(dir.path()), &evaluate_args)
        .await
        .unwrap();
    assert_eq!(
        outcome.as_redirect().map(|r| r.reason),
        Some(DenialReason::WrongNetwork)
    );
}

#[tokio::test]
async fn test_replayed_wallet_keeps_pending_switch() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write(
        dir.path(),
        "snap.json",
        r#"{"pending": {"is_switching": true}}"#,
    );
    let events = write(
        dir.path(),
        "events.json",
        &format!(r#"[{{"type": "connected", "address": "{ADDR}", "chain_id": 1}}]"#),
    );

    let mut evaluate_args = args(snapshot, "/generate");
    evaluate_args.wallet_events = Some(events);
    let outcome = evaluate::run(&config_with_storage(dir.path()), &evaluate_args)
        .await
        .unwrap();
    assert_eq!(outcome, RouteOutcome::Loading);
}
