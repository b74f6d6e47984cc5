//! Offline route gate evaluation

use anyhow::{Context, Result};
use clap::Args;
use passage_authorization::{GateSnapshot, RouteGate, RouteOutcome, RouteProtection};
use passage_core::{PassageConfig, RoutePath, WalletSource};
use passage_wallet::{WalletConnection, WalletEvent};
use std::path::{Path, PathBuf};

/// Evaluate the gate against a captured snapshot
#[derive(Debug, Clone, Args)]
pub struct EvaluateArgs {
    /// JSON snapshot of session, wallet and pending state
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Route being navigated to
    #[arg(short, long, default_value = "/")]
    pub route: String,

    /// JSON list of wallet events to replay instead of the snapshot's wallet
    #[arg(long)]
    pub wallet_events: Option<PathBuf>,

    /// Guard the route even if the route table marks it public
    #[arg(long)]
    pub protected: bool,

    /// Require the target chain (implies --protected)
    #[arg(long)]
    pub require_correct_chain: bool,
}

/// Run the evaluation and return the outcome.
pub async fn run(config: &PassageConfig, args: &EvaluateArgs) -> Result<RouteOutcome> {
    let mut snapshot: GateSnapshot = read_json(&args.snapshot).await?;
    let route = RoutePath::new(args.route.clone());
    let gate = RouteGate::from_config(config);

    if let Some(path) = &args.wallet_events {
        let events: Vec<WalletEvent> = read_json(path).await?;
        let mut wallet = WalletConnection::from_config(&config.wallet);
        wallet.apply_all(events);
        // Pending switch flags from the snapshot still apply.
        snapshot.wallet = wallet.snapshot();
    }

    let outcome = if args.protected || args.require_correct_chain {
        let table_requires = match gate.routes().protection_for(&route) {
            RouteProtection::Protected {
                require_correct_chain,
            } => require_correct_chain,
            RouteProtection::Public => config.gate.require_correct_chain,
        };
        let require = args.require_correct_chain || table_requires;
        gate.guard(&route, &snapshot, &snapshot, require)
    } else {
        gate.navigate(&route, &snapshot, &snapshot)
    };

    tracing::info!(route = %route, outcome = ?outcome, "Evaluated route");
    Ok(outcome)
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}
